//! Zip code → city → temperature pipeline.
//!
//! # Data Flow
//! ```text
//! ZipCode
//!     → CityResolver.resolve      (fails: CityNotFound)
//!     → WeatherLookup.fetch       (fails: WeatherUnavailable { city })
//!     → WeatherResult::from_celsius
//! ```
//!
//! The two lookups never overlap: the second needs the first's output.
//! Failure at either stage ends the request; nothing partial is returned.

pub mod orchestrator;

pub use orchestrator::{WeatherError, WeatherOrchestrator};
