//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by mode, status
//! - `gateway_request_duration_seconds` (histogram): latency by mode
//! - `gateway_errors_total` (counter): failures by error kind
//!
//! Recording is a no-op until [`init_metrics`] installs the Prometheus
//! recorder, so handlers call these helpers unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::flow::FlowMode;

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Prometheus metrics listener started");
    Ok(())
}

/// Record one completed request.
pub fn record_request(mode: FlowMode, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "mode" => mode.as_str(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("gateway_request_duration_seconds", "mode" => mode.as_str())
        .record(start.elapsed().as_secs_f64());
}

/// Record a failure by its kind label.
pub fn record_error(kind: &'static str) {
    metrics::counter!("gateway_errors_total", "kind" => kind).increment(1);
}
