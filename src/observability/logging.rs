//! Structured logging.
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (from `RUST_LOG`,
//! else the configured level), a text or JSON formatter, and the
//! OpenTelemetry layer. The OpenTelemetry layer is installed even when no
//! exporter is configured: trace context propagation depends on it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};
use crate::observability::telemetry::{Telemetry, TelemetryError};

/// Install the subscriber. Must be called once, inside the Tokio runtime.
pub fn init(config: &ObservabilityConfig) -> Result<Telemetry, TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=debug", config.log_level)));

    let (telemetry, tracer) = Telemetry::from_config(config)?;
    let otel = tracing_opentelemetry::layer().with_tracer(tracer);

    let json = (config.log_format == LogFormat::Json).then(|| tracing_subscriber::fmt::layer().json());
    let text = (config.log_format == LogFormat::Pretty).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(otel)
        .with(json)
        .with(text)
        .try_init()?;

    Ok(telemetry)
}
