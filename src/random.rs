//! Random-number sources for battle resolution.
//!
//! The arena only sees the [`RandomSource`] trait; production draws come
//! from random.org, tests and offline runs inject local implementations.

use std::time::Duration;

use tracing::debug;

use crate::error::{MealError, Result};

/// Default base URL of the external generator.
pub const RANDOM_ORG_BASE_URL: &str = "https://www.random.org";

/// Path and query requesting one plain-text decimal fraction with two
/// decimal digits.
pub const DECIMAL_FRACTIONS_QUERY: &str =
    "/decimal-fractions/?num=1&dec=2&col=1&format=plain&rnd=new";

/// Timeout applied to the draw request.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// A source of uniformly distributed values in [0, 1).
pub trait RandomSource {
    /// Produce one draw. A failed draw propagates immediately; there is
    /// no retry or caching layer.
    fn get_random(&self) -> Result<f64>;
}

/// HTTP client for random.org's decimal-fraction generator.
pub struct RandomOrgClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl RandomOrgClient {
    pub fn new() -> Self {
        Self::with_base_url(RANDOM_ORG_BASE_URL, REQUEST_TIMEOUT_SECS)
    }

    /// Client with a custom endpoint and timeout (for testing).
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request_url(&self) -> String {
        format!("{}{}", self.base_url, DECIMAL_FRACTIONS_QUERY)
    }
}

impl Default for RandomOrgClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_transport_error(err: reqwest::Error) -> MealError {
    if err.is_timeout() {
        MealError::RandomRequestTimeout
    } else {
        MealError::RandomRequestFailed(err.to_string())
    }
}

impl RandomSource for RandomOrgClient {
    fn get_random(&self) -> Result<f64> {
        let url = self.request_url();
        debug!("Fetching random number from {}", url);

        let response = self.client.get(&url).send().map_err(map_transport_error)?;
        let body = response.text().map_err(map_transport_error)?;

        let trimmed = body.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| MealError::RandomInvalidResponse(trimmed.to_string()))?;

        debug!("Received random number: {}", value);
        Ok(value)
    }
}

/// Process-local source backed by the thread RNG; for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn get_random(&self) -> Result<f64> {
        Ok(rand::random::<f64>())
    }
}

/// Source that always returns the wrapped value; the deterministic stub
/// used throughout the battle tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn get_random(&self) -> Result<f64> {
        Ok(self.0)
    }
}
