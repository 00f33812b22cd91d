//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): local requests by route, status
//! - `proxy_request_duration_seconds` (histogram): local latency by route
//! - `proxy_upstream_fetches_total` (counter): outbound fetches by outcome
//! - `proxy_upstream_fetch_duration_seconds` (histogram): outbound latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Failure is logged, not fatal: the proxy works without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed local request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one outbound fetch; `outcome` is `ok` or `error`.
pub fn record_upstream_fetch(outcome: &'static str, start: Instant) {
    counter!("proxy_upstream_fetches_total", "outcome" => outcome).increment(1);
    histogram!("proxy_upstream_fetch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
