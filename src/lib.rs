//! Bulk URL redirect service.
//!
//! Resolves an inbound request's host, path, and query string to a single
//! redirect destination, selected from rules loaded once at startup.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rules;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rules::{RuleIndex, RuleIndexBuilder};
