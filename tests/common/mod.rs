//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use redirectd::config::ServerConfig;
use redirectd::http::HttpServer;
use redirectd::lifecycle::Shutdown;
use redirectd::rules;

/// Start a redirect server on `addr` with rules from `rules_path`.
///
/// Returns the shutdown coordinator; trigger it to stop the server.
pub async fn start_server(addr: SocketAddr, rules_path: &Path) -> Shutdown {
    let index = rules::load_rules(rules_path).expect("rules file should load");

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(&config, Arc::new(index));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let handle = shutdown.handle();

    tokio::spawn(async move {
        let _ = server.run(listener, handle).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

/// Client that reports redirects instead of following them.
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
