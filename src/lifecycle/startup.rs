//! Startup orchestration.
//!
//! Subsystems come up in dependency order: telemetry, metrics, outbound
//! client, lookup components, listener. Any failure is fatal. The listener
//! binds last so traffic only arrives once everything else is ready, and
//! telemetry is flushed after the server has drained.

use std::net::{AddrParseError, SocketAddr};

use axum::http::method::InvalidMethod;
use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::{signals, Shutdown};
use crate::lookup::build_client;
use crate::observability::{logging, metrics, Propagation, TelemetryError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("failed to start metrics endpoint: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid forwarding method: {0}")]
    Method(#[from] InvalidMethod),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the service until SIGINT/SIGTERM.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let telemetry = logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        forwarding_url = %config.forwarding.url,
        span_export = telemetry.is_exporting(),
        "zip-weather starting"
    );

    let result = serve(&config).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Service stopped with error");
    }

    telemetry.shutdown();
    result
}

async fn serve(config: &ServiceConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    if config.providers.weather_api_key.is_empty() {
        tracing::warn!("WEATHER_API_KEY is not set, weather lookups will be rejected upstream");
    }

    let propagation = Propagation::w3c();
    let client = build_client(&config.timeouts)?;
    let state = AppState::from_config(config, client, propagation.clone())?;
    let server = HttpServer::new(config, state, propagation);

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::termination().await;
        shutdown.trigger();
    });

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Shutdown complete");
    Ok(())
}
