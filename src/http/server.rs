//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the redirect and liveness handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Parse the inbound request into host, path, and query parameters
//! - Answer 301 with the resolved destination, 404 on no match
//! - Serve until ctrl-c or an external shutdown trigger

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::lifecycle::ShutdownHandle;
use crate::observability::metrics;
use crate::rules::{QueryParams, RuleIndex};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleIndex>,
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over a frozen rule index.
    pub fn new(config: &ServerConfig, rules: Arc<RuleIndex>) -> Self {
        let state = AppState { rules };
        let router = Self::build_router(config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns after ctrl-c or after `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownHandle,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received");
                    }
                    _ = shutdown.wait() => {
                        tracing::info!("Shutdown triggered");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Liveness endpoint. Always 200, independent of the rule index.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Main redirect handler.
/// Resolves host + path + query against the rule index.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let path = request.uri().path().to_string();
    let raw_query = request.uri().query().unwrap_or("");
    let params = QueryParams::parse(raw_query);

    tracing::debug!(
        request_id = %request_id,
        host = %host,
        path = %path,
        query = %raw_query,
        "Resolving redirect"
    );

    match state.rules.resolve(&host, &path, &params) {
        Some(destination) => match HeaderValue::from_str(destination) {
            Ok(location) => {
                tracing::info!(
                    request_id = %request_id,
                    host = %host,
                    path = %path,
                    destination = %destination,
                    "Redirecting"
                );
                metrics::record_request(301, start_time);
                let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
                response.headers_mut().insert(header::LOCATION, location);
                response
            }
            Err(_) => {
                // A destination that cannot be sent as a header is a rules
                // file defect, not a resolution failure
                tracing::error!(
                    request_id = %request_id,
                    destination = %destination,
                    "Destination is not a valid Location header value"
                );
                metrics::record_request(500, start_time);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        None => {
            tracing::warn!(
                request_id = %request_id,
                host = %host,
                path = %path,
                "No redirect rule matched"
            );
            metrics::record_request(404, start_time);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
