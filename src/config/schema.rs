//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so that an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the weather service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Pass-through target used by `POST /`.
    pub forwarding: ForwardingConfig,

    /// External lookup services used by `GET /{zipcode}`.
    pub providers: ProviderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Forwarding target for the validate-and-forward entry point.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Base URL; the zip code is appended as the last path segment.
    pub url: String,

    /// HTTP method used for the forwarded call.
    pub method: String,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8081".to_string(),
            method: "GET".to_string(),
        }
    }
}

/// External lookup providers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// ViaCEP base URL; requests go to `{base}/{zipcode}/json/`.
    pub cep_base_url: String,

    /// WeatherAPI current-conditions endpoint.
    pub weather_base_url: String,

    /// WeatherAPI key, sent as the `key` query parameter.
    pub weather_api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            cep_base_url: "https://viacep.com.br/ws".to_string(),
            weather_base_url: "https://api.weatherapi.com/v1/current.json".to_string(),
            weather_api_key: String::new(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outbound connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Per outbound call timeout in seconds.
    pub upstream_secs: u64,

    /// Inbound request deadline in seconds. Outbound calls made on behalf
    /// of a request are cancelled when it expires.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 10,
            request_secs: 60,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// `service.name` resource attribute on exported spans.
    pub service_name: String,

    /// Name given to the span opened for every inbound request.
    pub request_span_name: String,

    /// OTLP gRPC collector endpoint. Span export is disabled when unset.
    pub otlp_endpoint: Option<String>,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            service_name: "zip-weather".to_string(),
            request_span_name: "weather-request".to_string(),
            otlp_endpoint: None,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
