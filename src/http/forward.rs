//! Pass-through call for the validate-and-forward entry point.
//!
//! The response is handed back untouched: status and body are relayed to
//! the caller, never interpreted.

use axum::body::Bytes;
use axum::http::method::InvalidMethod;
use axum::http::{Method, StatusCode};
use thiserror::Error;
use tracing::field::Empty;

use crate::config::ForwardingConfig;
use crate::domain::ZipCode;
use crate::observability::telemetry::mark_error;
use crate::observability::Propagation;

/// The forwarded call could not be completed.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("external call failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read external response: {0}")]
    Body(#[source] reqwest::Error),
}

/// Downstream status and body, as received.
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Sends `{method} {url}/{zipcode}` to the configured target.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    url: String,
    method: Method,
    propagation: Propagation,
}

impl Forwarder {
    pub fn new(
        client: reqwest::Client,
        config: &ForwardingConfig,
        propagation: Propagation,
    ) -> Result<Self, InvalidMethod> {
        Ok(Self {
            client,
            url: config.url.trim_end_matches('/').to_string(),
            method: Method::from_bytes(config.method.as_bytes())?,
            propagation,
        })
    }

    #[tracing::instrument(
        name = "ForwardZipcode",
        skip_all,
        fields(
            zipcode = %code,
            http.response.status_code = Empty,
            otel.status_code = Empty,
            otel.status_message = Empty,
        )
    )]
    pub async fn forward(&self, code: &ZipCode) -> Result<Relayed, ForwardError> {
        let span = tracing::Span::current();
        let url = format!("{}/{}", self.url, code);

        let response = self
            .client
            .request(self.method.clone(), url)
            .headers(self.propagation.outbound_headers())
            .send()
            .await
            .map_err(|e| {
                mark_error(&span, &e.to_string());
                ForwardError::Transport(e)
            })?;

        let status = response.status();
        span.record("http.response.status_code", status.as_u16());
        if status != StatusCode::OK {
            mark_error(&span, &format!("external call returned status {}", status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            mark_error(&span, &e.to_string());
            ForwardError::Body(e)
        })?;

        Ok(Relayed { status, body })
    }
}
