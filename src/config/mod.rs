//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → ServerConfig (immutable)
//!     → CLI flag overrides applied in main
//!     → handed to all subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so a config file is optional
//! - The rules file itself is loaded by the rules subsystem, not here

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::ObservabilityConfig;
pub use schema::ServerConfig;
