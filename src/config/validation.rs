//! Configuration validation.
//!
//! Serde handles the syntactic side; this checks that values make sense
//! before the config is accepted. Every problem is reported, not just the
//! first one.

use std::net::SocketAddr;

use axum::http::Method;
use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("{field} '{value}' is not a valid URL")]
    Url { field: &'static str, value: String },

    #[error("forwarding.method '{0}' is not an HTTP method")]
    Method(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, collecting all errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let urls = [
        ("forwarding.url", &config.forwarding.url),
        ("providers.cep_base_url", &config.providers.cep_base_url),
        ("providers.weather_base_url", &config.providers.weather_base_url),
    ];
    for (field, value) in urls {
        if Url::parse(value).is_err() {
            errors.push(ValidationError::Url { field, value: value.clone() });
        }
    }

    if let Some(endpoint) = &config.observability.otlp_endpoint {
        if Url::parse(endpoint).is_err() {
            errors.push(ValidationError::Url {
                field: "observability.otlp_endpoint",
                value: endpoint.clone(),
            });
        }
    }

    if Method::from_bytes(config.forwarding.method.as_bytes()).is_err() {
        errors.push(ValidationError::Method(config.forwarding.method.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
