//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value of a variable, if set. Empty values are
/// treated as unset.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(port) = var("HTTP_PORT") {
        config.listener.bind_address = format!("0.0.0.0:{}", port.trim());
    }
    if let Some(url) = var("EXTERNAL_CALL_URL") {
        config.forwarding.url = url;
    }
    if let Some(method) = var("EXTERNAL_CALL_METHOD") {
        config.forwarding.method = method.to_ascii_uppercase();
    }
    if let Some(url) = var("CEP_API_URL") {
        config.providers.cep_base_url = url;
    }
    if let Some(url) = var("WEATHER_API_URL") {
        config.providers.weather_base_url = url;
    }
    if let Some(key) = var("WEATHER_API_KEY") {
        config.providers.weather_api_key = key;
    }
    if let Some(name) = var("OTEL_SERVICE_NAME") {
        config.observability.service_name = name;
    }
    if let Some(endpoint) = var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.observability.otlp_endpoint = Some(endpoint);
    }
    if let Some(name) = var("REQUEST_NAME_OTEL") {
        config.observability.request_span_name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("HTTP_PORT", "8181"),
            ("EXTERNAL_CALL_URL", "http://service-b:8181"),
            ("EXTERNAL_CALL_METHOD", "post"),
            ("WEATHER_API_KEY", "secret"),
            ("OTEL_SERVICE_NAME", "service-a"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://otel-collector:4317"),
            ("REQUEST_NAME_OTEL", "service-a-request"),
        ]);
        let mut config = ServiceConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.listener.bind_address, "0.0.0.0:8181");
        assert_eq!(config.forwarding.url, "http://service-b:8181");
        assert_eq!(config.forwarding.method, "POST");
        assert_eq!(config.providers.weather_api_key, "secret");
        assert_eq!(config.observability.service_name, "service-a");
        assert_eq!(
            config.observability.otlp_endpoint.as_deref(),
            Some("http://otel-collector:4317")
        );
        assert_eq!(config.observability.request_span_name, "service-a-request");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let vars = env(&[("HTTP_PORT", ""), ("WEATHER_API_KEY", "  ")]);
        let mut config = ServiceConfig::default();
        apply_env_overrides(&mut config, |k| vars.get(k).cloned());

        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.providers.weather_api_key.is_empty());
    }

    #[test]
    fn test_load_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[forwarding]
url = "http://127.0.0.1:9000"

[timeouts]
request_secs = 15

[observability]
log_format = "json"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.timeouts.request_secs, 15);
        assert_eq!(config.timeouts.connect_secs, 5);
        assert_eq!(config.observability.log_format, crate::config::LogFormat::Json);
    }

    #[test]
    fn test_invalid_file_reports_validation_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nrequest_secs = 0").unwrap();

        match load_config(Some(file.path())) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::ZeroTimeout("request_secs")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
