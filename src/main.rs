//! redirectd: bulk URL redirect server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌────────────────────────────────────────────┐
//!                      │                 REDIRECTD                   │
//!                      │                                             │
//!   Client Request     │  ┌─────────┐    ┌──────────────────────┐   │
//!   ──────────────────┼─▶│  http   │───▶│   rules resolver      │   │
//!                      │  │ server  │    │ (host+path+query →    │   │
//!   301 / 404          │  │         │◀───│  destination)         │   │
//!   ◀──────────────────┼──└─────────┘    └──────────▲───────────┘   │
//!                      │                             │               │
//!                      │            startup only     │               │
//!                      │  ┌─────────────┐   ┌────────┴───────────┐  │
//!                      │  │ rules file  │──▶│  RuleIndexBuilder  │  │
//!                      │  │ (ordered)   │   │  → frozen index    │  │
//!                      │  └─────────────┘   └────────────────────┘  │
//!                      │                                             │
//!                      │  config / observability / lifecycle         │
//!                      └────────────────────────────────────────────┘
//! ```
//!
//! The rule index is built once, before the listener accepts traffic, and is
//! shared read-only by every request task afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use redirectd::config::{self, ServerConfig};
use redirectd::http::HttpServer;
use redirectd::lifecycle::Shutdown;
use redirectd::observability::{logging, metrics};
use redirectd::rules;

#[derive(Parser)]
#[command(name = "redirectd")]
#[command(version, about = "Bulk URL redirect server", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Redirect rules file path (overrides the config file).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Listening TCP port number (overrides the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(path) = cli.rules {
        config.rules.path = path;
    }
    if let Some(port) = cli.port {
        config.listener.bind_address = format!("0.0.0.0:{port}");
    }

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        rules_path = %config.rules.path.display(),
        "redirectd starting"
    );

    // Load phase: build and freeze the rule index before serving
    let index = rules::load_rules(&config.rules.path)?;
    if index.is_empty() {
        tracing::warn!("No redirect rules loaded, every request will answer 404");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }
    metrics::record_rules_loaded(index.rule_count());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, Arc::new(index));
    server.run(listener, shutdown.handle()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
