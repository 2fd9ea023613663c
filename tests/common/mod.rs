//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::TcpListener;

use zip_weather::config::{ForwardingConfig, ServiceConfig};
use zip_weather::domain::ZipCode;
use zip_weather::http::{AppState, Forwarder, HttpServer};
use zip_weather::lookup::{CityResolver, LookupError, WeatherLookup};
use zip_weather::observability::Propagation;
use zip_weather::{Shutdown, WeatherOrchestrator};

/// City resolver answering a fixed city, or failing when `None`.
pub struct StubCities {
    city: Option<String>,
    calls: AtomicUsize,
}

impl StubCities {
    pub fn new(city: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            city: city.map(str::to_string),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CityResolver for StubCities {
    async fn resolve(&self, _code: &ZipCode) -> Result<String, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.city.clone().ok_or(LookupError::MissingField {
            service: "stub",
            field: "localidade",
        })
    }
}

/// Weather lookup answering a fixed temperature, or failing when `None`.
pub struct StubWeather {
    temp_c: Option<f64>,
    calls: AtomicUsize,
}

impl StubWeather {
    pub fn new(temp_c: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            temp_c,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherLookup for StubWeather {
    async fn fetch(&self, _city: &str) -> Result<f64, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.temp_c.ok_or(LookupError::MissingField {
            service: "stub",
            field: "current.temp_c",
        })
    }
}

/// State with stubbed lookups and a forwarder aimed at `forward_url`.
pub fn stub_state(
    cities: Arc<StubCities>,
    weather: Arc<StubWeather>,
    forward_url: &str,
) -> AppState {
    let forwarding = ForwardingConfig {
        url: forward_url.to_string(),
        method: "GET".to_string(),
    };
    let forwarder = Forwarder::new(reqwest::Client::new(), &forwarding, Propagation::w3c()).unwrap();
    AppState::new(WeatherOrchestrator::new(cities, weather), forwarder)
}

/// Serve `state` on an ephemeral port. Returns the base URL and the handle
/// that stops the server.
pub async fn spawn_server(config: &ServiceConfig, state: AppState) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, state, Propagation::w3c());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
