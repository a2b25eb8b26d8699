//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_manifest_resolutions_total` (counter): by `outcome`
//! - `gateway_proxy_requests_total` (counter): by file `kind` and `status`
//! - `gateway_upstream_duration_seconds` (histogram): time to upstream
//!   response headers, by request `kind`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record the outcome of one manifest resolution.
pub fn record_manifest(outcome: &'static str) {
    ::metrics::counter!("gateway_manifest_resolutions_total", "outcome" => outcome).increment(1);
}

/// Record one proxied media request and the status returned to the client.
pub fn record_proxy(kind: &'static str, status: u16) {
    ::metrics::counter!(
        "gateway_proxy_requests_total",
        "kind" => kind,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record how long an upstream took to answer.
pub fn record_upstream(kind: &'static str, started: Instant) {
    ::metrics::histogram!("gateway_upstream_duration_seconds", "kind" => kind)
        .record(started.elapsed().as_secs_f64());
}
