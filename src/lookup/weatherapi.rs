//! Current temperature through WeatherAPI.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::field::Empty;

use crate::lookup::{get_json, LookupError, WeatherLookup};
use crate::observability::metrics;
use crate::observability::telemetry::mark_error;
use crate::observability::Propagation;

const SERVICE: &str = "weatherapi";

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Option<Current>,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: Option<f64>,
}

/// [`WeatherLookup`] backed by `GET {endpoint}?key={api_key}&q={city}`.
#[derive(Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    propagation: Propagation,
}

impl WeatherApiClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        propagation: Propagation,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            propagation,
        }
    }

    async fn lookup(&self, city: &str) -> Result<f64, LookupError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .headers(self.propagation.outbound_headers());
        let response: CurrentResponse = get_json(SERVICE, request).await?;

        response
            .current
            .and_then(|current| current.temp_c)
            .ok_or(LookupError::MissingField {
                service: SERVICE,
                field: "current.temp_c",
            })
    }
}

impl std::fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiClient {
    #[tracing::instrument(
        name = "GetWeather",
        skip_all,
        fields(
            city = %city,
            tempC = Empty,
            otel.status_code = Empty,
            otel.status_message = Empty,
        )
    )]
    async fn fetch(&self, city: &str) -> Result<f64, LookupError> {
        let span = tracing::Span::current();
        match self.lookup(city).await {
            Ok(temp_c) => {
                span.record("tempC", temp_c);
                metrics::record_lookup(SERVICE, "ok");
                Ok(temp_c)
            }
            Err(e) => {
                span.record("tempC", "not found");
                mark_error(&span, &e.to_string());
                tracing::warn!(error = %e, "Weather lookup failed");
                metrics::record_lookup(SERVICE, "error");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> WeatherApiClient {
        WeatherApiClient::new(
            reqwest::Client::new(),
            format!("{}/v1/current.json", server.uri()),
            "test-key",
            Propagation::w3c(),
        )
    }

    #[tokio::test]
    async fn test_fetches_temperature_with_key_and_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "São Paulo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "location": {"name": "Sao Paulo"},
                "current": {"temp_c": 21.5, "temp_f": 70.7}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp = client_for(&server).fetch("São Paulo").await.unwrap();
        assert_eq!(temp, 21.5);
    }

    #[tokio::test]
    async fn test_integer_temperature_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {"temp_c": 30}
            })))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).fetch("Recife").await.unwrap(), 30.0);
    }

    #[tokio::test]
    async fn test_missing_current_is_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "location": {"name": "Nowhere"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch("Nowhere").await.unwrap_err();
        assert!(matches!(
            err,
            LookupError::MissingField { service: "weatherapi", field: "current.temp_c" }
        ));
    }

    #[tokio::test]
    async fn test_string_temperature_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current": {"temp_c": "hot"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch("Natal").await.unwrap_err();
        assert!(matches!(err, LookupError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_rejected_key_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"code": 2006, "message": "API key is invalid."}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch("Curitiba").await.unwrap_err();
        match err {
            LookupError::Status { status, .. } => assert_eq!(status.as_u16(), 401),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = WeatherApiClient::new(
            reqwest::Client::new(),
            "http://localhost/v1/current.json",
            "super-secret",
            Propagation::w3c(),
        );
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
