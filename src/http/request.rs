//! Inbound request instrumentation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the caller sent none
//! - Open the per-request span, parented on the caller's trace context
//! - Record the response status on that span
//!
//! # Design Decisions
//! - Request ID is set before the span is opened so the span carries it
//! - The span name comes from configuration (`otel.name`), so several
//!   deployments of this service can be told apart in one trace

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Request, Response};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::field::Empty;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::observability::Propagation;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Opens the span that covers one inbound request.
#[derive(Debug, Clone)]
pub struct InboundSpan {
    name: Arc<str>,
    propagation: Propagation,
}

impl InboundSpan {
    pub fn new(name: impl Into<Arc<str>>, propagation: Propagation) -> Self {
        Self {
            name: name.into(),
            propagation,
        }
    }
}

impl<B> MakeSpan<B> for InboundSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        let span = tracing::info_span!(
            "request",
            otel.name = %self.name,
            otel.kind = "server",
            http.request.method = %request.method(),
            url.path = %request.uri().path(),
            request_id = %request_id,
            http.response.status_code = Empty,
            otel.status_code = Empty,
            otel.status_message = Empty,
        );
        span.set_parent(self.propagation.extract(request.headers()));
        span
    }
}

/// Records the final status code on the request span.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordStatus;

impl<B> OnResponse<B> for RecordStatus {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();
        span.record("http.response.status_code", status);
        tracing::debug!(
            status,
            latency_ms = latency.as_millis() as u64,
            "Finished request"
        );
    }
}
