//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirectd_requests_total` (counter): requests by response status
//! - `redirectd_request_duration_seconds` (histogram): latency distribution
//! - `redirectd_rules_loaded` (gauge): rules in the frozen index
//!
//! # Design Decisions
//! - Recording helpers are no-ops until the exporter is installed, so the
//!   call sites need no feature gating

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!("redirectd_requests_total", "Total requests by response status");
            describe_histogram!(
                "redirectd_request_duration_seconds",
                "Request handling latency in seconds"
            );
            describe_gauge!("redirectd_rules_loaded", "Redirect rules in the frozen index");
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one handled request.
pub fn record_request(status: u16, start_time: Instant) {
    counter!("redirectd_requests_total", "status" => status.to_string()).increment(1);
    histogram!("redirectd_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}

/// Record how many rules the index holds.
pub fn record_rules_loaded(count: usize) {
    gauge!("redirectd_rules_loaded").set(count as f64);
}
