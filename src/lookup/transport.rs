//! Shared outbound HTTP transport.
//!
//! One `reqwest::Client` (and so one connection pool) is built at startup
//! and cloned into every component that calls out.

use std::time::Duration;

use crate::config::TimeoutConfig;

const USER_AGENT: &str = concat!("zip-weather/", env!("CARGO_PKG_VERSION"));

/// Build the outbound client with the configured timeouts.
pub fn build_client(timeouts: &TimeoutConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.upstream_secs))
        .user_agent(USER_AGENT)
        .build()
}
