//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_requests_total` (counter): requests by route class, method, status
//! - `edge_request_duration_seconds` (histogram): latency by route class
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus exporter.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(route: &'static str, method: &Method, status: u16, start: Instant) {
    ::metrics::counter!(
        "edge_requests_total",
        "route" => route,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    ::metrics::histogram!("edge_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
