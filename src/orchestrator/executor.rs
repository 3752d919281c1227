// Retry executor: cache lookup, backend dispatch, fallback and backoff
// Author: kelexine (https://github.com/kelexine)

use crate::backend::{BackendCall, BackendError, InferenceBackend};
use crate::cache::{compute_key, CacheStore};
use crate::error::Result;
use crate::metrics::MetricsRecorder;
use crate::models::GenerationRequest;
use crate::utils::retry::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, warn};

/// Where a logical request stands between backend attempts.
#[derive(Debug)]
enum AttemptState {
    Pending,
    InFlight,
    FallbackRetry,
    BackoffRetry(Duration),
    Terminal(BackendError),
}

/// Resolves a [`GenerationRequest`] against the cache or the backend.
///
/// The loop is bounded by plain integers: one fallback escalation at most,
/// and `retries_remaining` backoff attempts per model.
pub struct RetryExecutor {
    backend: Arc<dyn InferenceBackend>,
    cache: Arc<CacheStore>,
    metrics: Arc<MetricsRecorder>,
    policy: RetryPolicy,
    cache_enabled: bool,
}

impl RetryExecutor {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        cache: Arc<CacheStore>,
        metrics: Arc<MetricsRecorder>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            backend,
            cache,
            metrics,
            policy,
            cache_enabled: true,
        }
    }

    /// Globally enable or disable response caching.
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Generate text for `request`, retrying and escalating as needed.
    pub async fn generate(&self, mut request: GenerationRequest) -> Result<String> {
        // Keyed on the caller's model, so a fallback answer is cached for the
        // request as the caller issued it
        let cache_key = (self.cache_enabled && request.use_cache).then(|| {
            request
                .cache_key
                .clone()
                .unwrap_or_else(|| compute_key(&request.payload, &request.model))
        });

        let mut state = AttemptState::Pending;
        loop {
            state = match state {
                AttemptState::Pending => {
                    if let Some(hit) = cache_key.as_deref().and_then(|key| self.cache.get(key)) {
                        return Ok(hit);
                    }
                    AttemptState::InFlight
                }
                AttemptState::InFlight => match self.attempt(&request).await {
                    Ok(text) => {
                        if let Some(key) = cache_key.as_deref() {
                            self.cache.set(key, text.clone());
                        }
                        return Ok(text);
                    }
                    Err(err) => self.next_state(&request, err),
                },
                AttemptState::FallbackRetry => {
                    request = request.escalate(&self.policy.fallback_model, self.policy.fallback_retries);
                    AttemptState::InFlight
                }
                AttemptState::BackoffRetry(delay) => {
                    tokio::time::sleep(delay).await;
                    request = GenerationRequest {
                        retries_remaining: request.retries_remaining - 1,
                        ..request
                    };
                    AttemptState::InFlight
                }
                AttemptState::Terminal(err) => {
                    error!(
                        "Generation failed on model {} with no retries left: {}",
                        request.model, err
                    );
                    crate::metrics::record_retry_event("exhausted");
                    return Err(err.into());
                }
            };
        }
    }

    /// Decide what follows a failed attempt.
    fn next_state(&self, request: &GenerationRequest, err: BackendError) -> AttemptState {
        if err.kind.escalates() && request.model != self.policy.fallback_model {
            warn!(
                "Model {} failed ({}), escalating to fallback model {}",
                request.model,
                err.kind.as_str(),
                self.policy.fallback_model
            );
            crate::metrics::record_retry_event("fallback");
            AttemptState::FallbackRetry
        } else if request.retries_remaining > 0 {
            let delay = self.policy.backoff_delay(request.retries_remaining);
            warn!(
                "Model {} failed ({}), retrying in {}ms ({} retries left)",
                request.model,
                err,
                delay.as_millis(),
                request.retries_remaining
            );
            crate::metrics::record_retry_event("backoff");
            AttemptState::BackoffRetry(delay)
        } else {
            AttemptState::Terminal(err)
        }
    }

    /// One bounded backend call; every outcome is accounted for.
    async fn attempt(&self, request: &GenerationRequest) -> std::result::Result<String, BackendError> {
        let call = BackendCall {
            messages: request.payload.to_messages(),
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            response_format: request.response_format,
        };

        debug!(
            "Dispatching to backend: model={}, retries_remaining={}",
            call.model, request.retries_remaining
        );

        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.policy.request_timeout, self.backend.generate(&call)).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::network(format!(
                "request timed out after {}s",
                self.policy.request_timeout.as_secs()
            ))),
        };
        let elapsed = start.elapsed();

        self.metrics
            .record(outcome.is_ok(), elapsed.as_secs_f64() * 1000.0);
        crate::metrics::record_backend_call(&call.model, outcome.is_ok(), elapsed.as_secs_f64());

        outcome
    }
}
