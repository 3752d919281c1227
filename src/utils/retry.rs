// Retry budget and backoff schedule
// Author: kelexine (https://github.com/kelexine)

use crate::config::{BackendConfig, RetryConfig};
use std::time::Duration;

/// Budgets and timings that bound a single logical generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retry budget of a fresh request.
    pub initial_retries: u32,
    /// Budget granted once when switching to the fallback model.
    pub fallback_retries: u32,
    pub backoff_base: Duration,
    pub fallback_model: String,
    /// Upper bound on a single backend attempt.
    pub request_timeout: Duration,
}

impl RetryPolicy {
    pub fn from_config(retry: &RetryConfig, backend: &BackendConfig) -> Self {
        Self {
            initial_retries: retry.initial_retries,
            fallback_retries: retry.fallback_retries,
            backoff_base: Duration::from_millis(retry.backoff_base_ms),
            fallback_model: backend.fallback_model.clone(),
            request_timeout: Duration::from_secs(backend.timeout_seconds),
        }
    }

    /// Delay before the next attempt when `remaining` retries are left.
    ///
    /// With the default budget of 3 this is `2000 * (4 - remaining)` ms:
    /// 2s, 4s, 6s. A fallback budget starts part-way along the same ramp.
    pub fn backoff_delay(&self, remaining: u32) -> Duration {
        let step = (self.initial_retries + 1).saturating_sub(remaining);
        self.backoff_base * step
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default(), &BackendConfig::default())
    }
}
