//! OpenTelemetry span export.
//!
//! Spans are produced with `tracing` and bridged by `tracing-opentelemetry`
//! into an SDK tracer provider. The provider is always installed so that
//! inbound trace context parents the request span and reaches outbound
//! headers. Export is optional: without a configured endpoint the provider
//! has no exporter and spans stay in-process.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};
use thiserror::Error;

use crate::config::ObservabilityConfig;

/// Errors raised while setting up telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter for {endpoint}: {reason}")]
    Exporter { endpoint: String, reason: String },

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Mark `span` as failed. The span must declare `otel.status_code` and
/// `otel.status_message` fields; the OpenTelemetry layer maps them onto the
/// exported span status.
pub fn mark_error(span: &tracing::Span, message: &str) {
    span.record("otel.status_code", "ERROR");
    span.record("otel.status_message", message);
}

/// Owns the tracer provider so pending spans can be flushed on exit.
#[derive(Debug)]
pub struct Telemetry {
    provider: TracerProvider,
    exporting: bool,
}

impl Telemetry {
    /// Build the tracer provider, with a batched OTLP/gRPC exporter when an
    /// endpoint is configured.
    ///
    /// Returns the tracer to plug into the subscriber alongside the handle.
    pub fn from_config(config: &ObservabilityConfig) -> Result<(Self, Tracer), TelemetryError> {
        let mut builder = TracerProvider::builder().with_resource(Resource::new(vec![
            KeyValue::new("service.name", config.service_name.clone()),
        ]));

        let exporting = match config.otlp_endpoint.as_deref() {
            Some(endpoint) => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(endpoint)
                    .build()
                    .map_err(|e| TelemetryError::Exporter {
                        endpoint: endpoint.to_string(),
                        reason: e.to_string(),
                    })?;
                builder = builder.with_batch_exporter(exporter, runtime::Tokio);
                true
            }
            None => false,
        };

        let provider = builder.build();
        let tracer = provider.tracer(config.service_name.clone());

        Ok((Self { provider, exporting }, tracer))
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Flush pending spans and stop the exporter.
    pub fn shutdown(self) {
        if !self.exporting {
            return;
        }
        if let Err(e) = self.provider.shutdown() {
            tracing::error!(error = %e, "Error shutting down tracer provider");
        }
    }
}
