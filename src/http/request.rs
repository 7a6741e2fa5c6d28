//! Request identification middleware.
//!
//! # Responsibilities
//! - Assign each inbound request an x-request-id header (UUID v4)
//! - Leave an existing id from an upstream proxy untouched
//!
//! # Design Decisions
//! - The id is attached before any handler runs so every log line of a
//!   request can carry it

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that applies [`RequestIdService`].
#[derive(Debug, Clone, Copy)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service that ensures every request carries an x-request-id header.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        if !req.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut().insert(X_REQUEST_ID, value);
            }
        }
        self.inner.call(req)
    }
}
