//! External lookup capabilities.
//!
//! # Data Flow
//! ```text
//! ZipCode ──▶ CityResolver (viacep.rs) ──▶ city name
//! city    ──▶ WeatherLookup (weatherapi.rs) ──▶ temperature (°C)
//! ```
//!
//! Both clients share one `reqwest::Client` (transport.rs) and the
//! injected trace [`Propagation`](crate::observability::Propagation). Each
//! call opens its own span, records its result on it, and is attempted once.

pub mod transport;
pub mod viacep;
pub mod weatherapi;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::ZipCode;

pub use transport::build_client;
pub use viacep::ViaCepClient;
pub use weatherapi::WeatherApiClient;

/// An outbound lookup failed.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned status {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    #[error("{service} returned an unreadable body: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} response has no {field}")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },
}

impl LookupError {
    pub fn service(&self) -> &'static str {
        match self {
            LookupError::Transport { service, .. }
            | LookupError::Status { service, .. }
            | LookupError::Decode { service, .. }
            | LookupError::MissingField { service, .. } => *service,
        }
    }
}

/// Maps a zip code to a city name.
#[async_trait]
pub trait CityResolver: Send + Sync {
    async fn resolve(&self, code: &ZipCode) -> Result<String, LookupError>;
}

/// Maps a city name to its current temperature in Celsius.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<f64, LookupError>;
}

/// Send a GET and decode the JSON body of a 200 response.
///
/// Shared by both clients: everything except a 200 with a body that decodes
/// as `T` is a [`LookupError`].
pub(crate) async fn get_json<T: DeserializeOwned>(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, LookupError> {
    let response = request
        .send()
        .await
        .map_err(|source| LookupError::Transport { service, source })?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(LookupError::Status { service, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| LookupError::Transport { service, source })?;

    serde_json::from_slice(&body).map_err(|source| LookupError::Decode { service, source })
}
