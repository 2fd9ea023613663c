//! Route handlers.
//!
//! `POST /` and `GET /{zipcode}` are independent paths: the first forwards
//! to the configured target, the second runs the lookup pipeline.

use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::{InvalidZipCode, WeatherResult, ZipCode, ZipCodeRequest};
use crate::http::response::ApiError;
use crate::http::server::AppState;

/// `POST /` with `{"cep": "..."}`: validate, then relay the forwarding
/// target's answer.
pub async fn forward_zipcode(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ZipCodeRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    let code = ZipCode::parse(&request.zipcode)?;

    tracing::debug!(zipcode = %code, "Forwarding zip code");
    let relayed = state.forwarder.forward(&code).await?;

    if relayed.status != StatusCode::OK {
        return Err(ApiError::Relay {
            status: relayed.status,
            body: relayed.body,
        });
    }

    Ok(([(header::CONTENT_TYPE, "application/json")], relayed.body).into_response())
}

/// `GET /{zipcode}`: current temperature for the zip code's city.
///
/// A segment that does not decode to UTF-8 cannot be a zip code and is
/// rejected like any other malformed one.
pub async fn weather_by_zipcode(
    State(state): State<AppState>,
    zipcode: Result<Path<String>, PathRejection>,
) -> Result<Json<WeatherResult>, ApiError> {
    let Path(zipcode) = zipcode.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Undecodable zip code segment");
        InvalidZipCode
    })?;
    let code = ZipCode::parse(&zipcode)?;
    let result = state.orchestrator.weather_by_zipcode(&code).await?;

    tracing::info!(
        zipcode = %code,
        city = %result.city,
        temp_c = result.temp_c,
        "Weather resolved"
    );
    Ok(Json(result))
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "."
}
