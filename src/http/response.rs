//! Error to response mapping.
//!
//! # Status Codes
//! - body that is not JSON → 500 with the decoder message
//! - invalid zip code → 422
//! - city or weather lookup failure → 404 with the pipeline message
//! - forwarded call failed to complete → 500
//! - forwarded call answered non-200 → that status and body, verbatim
//!
//! Every error marks the current request span as failed before it is
//! turned into a response.

use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::domain::InvalidZipCode;
use crate::http::forward::ForwardError;
use crate::observability::telemetry::mark_error;
use crate::pipeline::WeatherError;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    MalformedBody(String),

    #[error(transparent)]
    InvalidZipCode(#[from] InvalidZipCode),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("external call returned status {}", .status.as_u16())]
    Relay { status: StatusCode, body: Bytes },
}

impl ApiError {
    /// Short description recorded as the span status message.
    fn span_message(&self) -> String {
        match self {
            ApiError::MalformedBody(_) => "Failed to decode request".to_string(),
            ApiError::InvalidZipCode(_) => "Invalid zipcode".to_string(),
            ApiError::Weather(_) => "Failed to get weather".to_string(),
            ApiError::Forward(_) => "External call failed".to_string(),
            ApiError::Relay { .. } => self.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::Forward(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidZipCode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Weather(_) => StatusCode::NOT_FOUND,
            ApiError::Relay { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let span = tracing::Span::current();
        mark_error(&span, &self.span_message());

        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = match self {
            ApiError::Relay { body, .. } => body,
            other => Bytes::from(other.to_string()),
        };
        (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
    }
}
