//! Zip code weather service.
//!
//! Resolves a Brazilian zip code (CEP) to its city through ViaCEP, fetches
//! the city's current temperature from WeatherAPI and answers in Celsius,
//! Fahrenheit and Kelvin. A second entry point validates a zip code and
//! forwards it verbatim to another service. Trace context received from the
//! caller is propagated to every outbound call.

// Core
pub mod domain;
pub mod lookup;
pub mod pipeline;

// Serving
pub mod config;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use domain::{WeatherResult, ZipCode};
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use pipeline::{WeatherError, WeatherOrchestrator};
