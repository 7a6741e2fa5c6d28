//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Redirect rules source.
    pub rules: RulesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Redirect rules source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Path to the comma-delimited rules file.
    pub path: PathBuf,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("configs/examples.csv"),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON-formatted logs instead of the human-readable format.
    pub log_json: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.rules.path, PathBuf::from("configs/examples.csv"));
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [rules]
            path = "rules/live.csv"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.rules.path, PathBuf::from("rules/live.csv"));
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_level, "info");
    }
}
