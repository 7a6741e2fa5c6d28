//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → redirect handler (host + path + query → rule resolution)
//!     → 301 Location / 404 Not Found
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
