//! Trace context propagation across HTTP boundaries.
//!
//! # Responsibilities
//! - Extract trace context from incoming request headers
//! - Inject the active span's context into outbound request headers
//!
//! # Design Decisions
//! - W3C Trace Context (`traceparent`/`tracestate`)
//! - The carrier is built once at startup and handed to every component,
//!   nothing reads a process-wide propagator

use std::sync::Arc;

use axum::http::HeaderMap;
use opentelemetry::propagation::TextMapPropagator;
use opentelemetry::Context;
use opentelemetry_http::{HeaderExtractor, HeaderInjector};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Moves trace context in and out of HTTP headers.
#[derive(Clone)]
pub struct Propagation {
    propagator: Arc<dyn TextMapPropagator + Send + Sync>,
}

impl Propagation {
    /// W3C Trace Context propagation.
    pub fn w3c() -> Self {
        Self::new(TraceContextPropagator::new())
    }

    pub fn new<P>(propagator: P) -> Self
    where
        P: TextMapPropagator + Send + Sync + 'static,
    {
        Self {
            propagator: Arc::new(propagator),
        }
    }

    /// Context carried by inbound request headers. Empty when the caller
    /// sent none.
    pub fn extract(&self, headers: &HeaderMap) -> Context {
        self.propagator.extract(&HeaderExtractor(headers))
    }

    /// Write `cx` into `headers`.
    pub fn inject_context(&self, cx: &Context, headers: &mut HeaderMap) {
        self.propagator
            .inject_context(cx, &mut HeaderInjector(headers));
    }

    /// Write the context of `span` into `headers`.
    pub fn inject(&self, span: &tracing::Span, headers: &mut HeaderMap) {
        self.inject_context(&span.context(), headers);
    }

    /// Headers carrying the current span's context, ready for an outbound
    /// request.
    pub fn outbound_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.inject(&tracing::Span::current(), &mut headers);
        headers
    }
}

impl Default for Propagation {
    fn default() -> Self {
        Self::w3c()
    }
}

impl std::fmt::Debug for Propagation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Propagation").finish_non_exhaustive()
    }
}
