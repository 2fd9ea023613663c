//! City resolution through ViaCEP.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::field::Empty;

use crate::domain::ZipCode;
use crate::lookup::{get_json, CityResolver, LookupError};
use crate::observability::metrics;
use crate::observability::telemetry::mark_error;
use crate::observability::Propagation;

const SERVICE: &str = "viacep";

/// Only the field we use. ViaCEP answers unknown codes with
/// `200 {"erro": "true"}`, which leaves `localidade` unset.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    localidade: Option<String>,
}

/// [`CityResolver`] backed by `GET {base}/{zipcode}/json/`.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
    propagation: Propagation,
}

impl ViaCepClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, propagation: Propagation) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            propagation,
        }
    }

    fn url(&self, code: &ZipCode) -> String {
        format!("{}/{}/json/", self.base_url.trim_end_matches('/'), code)
    }

    async fn lookup(&self, code: &ZipCode) -> Result<String, LookupError> {
        let request = self
            .client
            .get(self.url(code))
            .headers(self.propagation.outbound_headers());
        let response: ViaCepResponse = get_json(SERVICE, request).await?;

        response
            .localidade
            .filter(|city| !city.trim().is_empty())
            .ok_or(LookupError::MissingField {
                service: SERVICE,
                field: "localidade",
            })
    }
}

#[async_trait]
impl CityResolver for ViaCepClient {
    #[tracing::instrument(
        name = "GetCity",
        skip_all,
        fields(
            zipcode = %code,
            city = Empty,
            otel.status_code = Empty,
            otel.status_message = Empty,
        )
    )]
    async fn resolve(&self, code: &ZipCode) -> Result<String, LookupError> {
        let span = tracing::Span::current();
        match self.lookup(code).await {
            Ok(city) => {
                span.record("city", city.as_str());
                metrics::record_lookup(SERVICE, "ok");
                Ok(city)
            }
            Err(e) => {
                span.record("city", "not found");
                mark_error(&span, &e.to_string());
                tracing::warn!(error = %e, "City lookup failed");
                metrics::record_lookup(SERVICE, "error");
                Err(e)
            }
        }
    }
}
