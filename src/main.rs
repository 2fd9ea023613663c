//! Zip code weather service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  ZIP-WEATHER                      │
//!   POST / {"cep"}     │  ┌────────┐   ┌───────────┐                       │
//!   ───────────────────┼─▶│  http  │──▶│ forwarder │───────────────────────┼──▶ EXTERNAL_CALL_URL
//!                      │  │ server │   └───────────┘                       │
//!   GET /{zipcode}     │  │        │   ┌──────────────┐   ┌────────────┐   │
//!   ───────────────────┼─▶│        │──▶│ orchestrator │──▶│   viacep   │───┼──▶ ViaCEP
//!                      │  └────────┘   │              │   └────────────┘   │
//!                      │               │              │   ┌────────────┐   │
//!                      │               │              │──▶│ weatherapi │───┼──▶ WeatherAPI
//!                      │               └──────────────┘   └────────────┘   │
//!                      │                                                    │
//!                      │   config · observability (logs, spans, metrics)    │
//!                      │   lifecycle (startup, signals, shutdown)           │
//!                      └──────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from an optional TOML file (`--config`) overlaid
//! with environment variables (`HTTP_PORT`, `EXTERNAL_CALL_URL`,
//! `WEATHER_API_KEY`, `OTEL_EXPORTER_OTLP_ENDPOINT`, ...).

use std::path::PathBuf;

use clap::Parser;

use zip_weather::config::load_config;
use zip_weather::lifecycle::startup;

#[derive(Parser)]
#[command(name = "zip-weather")]
#[command(about = "Current temperature by Brazilian zip code", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    startup::run(config).await?;
    Ok(())
}
