//! Metrics collection and exposition.
//!
//! # Metrics
//! - `weather_http_requests_total` (counter): inbound requests by route, status
//! - `weather_http_request_duration_seconds` (histogram): inbound latency by route
//! - `weather_lookup_total` (counter): outbound lookups by service, outcome
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    let route = route.to_string();
    metrics::counter!(
        "weather_http_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("weather_http_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of an outbound lookup.
pub fn record_lookup(service: &'static str, outcome: &'static str) {
    metrics::counter!(
        "weather_lookup_total",
        "service" => service,
        "outcome" => outcome
    )
    .increment(1);
}
