//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, request span, panic recovery, deadline)
//! - Record per-route metrics
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::http::method::InvalidMethod;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::forward::Forwarder;
use crate::http::handlers;
use crate::http::request::{InboundSpan, MakeRequestUuid, RecordStatus};
use crate::lookup::{ViaCepClient, WeatherApiClient};
use crate::observability::{metrics, Propagation};
use crate::pipeline::WeatherOrchestrator;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<WeatherOrchestrator>,
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    pub fn new(orchestrator: WeatherOrchestrator, forwarder: Forwarder) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            forwarder: Arc::new(forwarder),
        }
    }

    /// Wire the production lookup clients over the shared `client`.
    pub fn from_config(
        config: &ServiceConfig,
        client: reqwest::Client,
        propagation: Propagation,
    ) -> Result<Self, InvalidMethod> {
        let providers = &config.providers;
        let cities = ViaCepClient::new(client.clone(), &providers.cep_base_url, propagation.clone());
        let weather = WeatherApiClient::new(
            client.clone(),
            &providers.weather_base_url,
            &providers.weather_api_key,
            propagation.clone(),
        );
        let forwarder = Forwarder::new(client, &config.forwarding, propagation)?;

        Ok(Self::new(
            WeatherOrchestrator::new(Arc::new(cities), Arc::new(weather)),
            forwarder,
        ))
    }
}

/// HTTP server for the weather service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and state.
    pub fn new(config: &ServiceConfig, state: AppState, propagation: Propagation) -> Self {
        Self {
            router: Self::build_router(config, state, propagation),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A request still running at the deadline is dropped and answered
    /// with 504.
    fn build_router(config: &ServiceConfig, state: AppState, propagation: Propagation) -> Router {
        let span = InboundSpan::new(config.observability.request_span_name.as_str(), propagation);

        Router::new()
            .route("/", post(handlers::forward_zipcode))
            .route("/health", get(handlers::health))
            .route("/{zipcode}", get(handlers::weather_by_zipcode))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(span)
                            .on_response(RecordStatus),
                    )
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(CatchPanicLayer::new())
                    .layer(TimeoutLayer::with_status_code(
                        StatusCode::GATEWAY_TIMEOUT,
                        Duration::from_secs(config.timeouts.request_secs),
                    )),
            )
    }

    /// The router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    metrics::record_request(&route, response.status().as_u16(), start);
    response
}
