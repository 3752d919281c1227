//! Request orchestration for the travel operations.
//!
//! [`RequestOrchestrator`] is the operation surface consumed by the HTTP
//! layer. Each operation validates its inputs, builds a prompt, hands a
//! [`GenerationRequest`] to the [`RetryExecutor`] and parses the reply.
//! All mutable state (cache, metrics, sessions) is injected at construction.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod executor;
pub mod parsing;

pub use executor::RetryExecutor;

use crate::backend::InferenceBackend;
use crate::cache::{translation_key, CacheStore};
use crate::config::AppConfig;
use crate::conversation::ConversationMemory;
use crate::error::{OrchestratorError, Result};
use crate::metrics::MetricsRecorder;
use crate::models::{
    ChatMessage, ConversationTurn, GenerationOptions, GenerationRequest, InsightsResult, ItineraryResult,
    MetricsSnapshot, Payload, ResponseFormat, TranslationResult, TravelerProfile,
};
use crate::prompts;
use crate::utils::retry::RetryPolicy;
use std::sync::Arc;
use tracing::{debug, info};

/// Sampling defaults of one operation.
#[derive(Debug, Clone, Copy)]
struct OperationDefaults {
    temperature: f32,
    max_tokens: u32,
    response_format: Option<ResponseFormat>,
}

const INSIGHTS: OperationDefaults = OperationDefaults {
    temperature: 0.7,
    max_tokens: 2048,
    response_format: Some(ResponseFormat::JsonObject),
};

const ITINERARY: OperationDefaults = OperationDefaults {
    temperature: 0.5,
    max_tokens: 4096,
    response_format: None,
};

const TRANSLATION: OperationDefaults = OperationDefaults {
    temperature: 0.1,
    max_tokens: 1024,
    response_format: None,
};

const CHAT: OperationDefaults = OperationDefaults {
    temperature: 0.7,
    max_tokens: 1024,
    response_format: None,
};

pub struct RequestOrchestrator {
    executor: RetryExecutor,
    cache: Arc<CacheStore>,
    metrics: Arc<MetricsRecorder>,
    memory: ConversationMemory,
    primary_model: String,
}

impl RequestOrchestrator {
    pub fn new(
        executor: RetryExecutor,
        cache: Arc<CacheStore>,
        metrics: Arc<MetricsRecorder>,
        memory: ConversationMemory,
        primary_model: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            cache,
            metrics,
            memory,
            primary_model: primary_model.into(),
        }
    }

    /// Wire up fresh state objects from configuration.
    pub fn from_config(config: &AppConfig, backend: Arc<dyn InferenceBackend>) -> Self {
        let cache = Arc::new(CacheStore::from_config(&config.cache));
        let metrics = Arc::new(MetricsRecorder::new());
        let policy = RetryPolicy::from_config(&config.retry, &config.backend);
        let executor = RetryExecutor::new(backend, cache.clone(), metrics.clone(), policy)
            .with_caching(config.cache.enabled);

        Self::new(
            executor,
            cache,
            metrics,
            ConversationMemory::from_config(&config.conversation),
            config.backend.primary_model.clone(),
        )
    }

    fn build_request(
        &self,
        payload: Payload,
        defaults: OperationDefaults,
        options: &GenerationOptions,
    ) -> GenerationRequest {
        let request = GenerationRequest {
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
            response_format: defaults.response_format,
            retries_remaining: self.executor.policy().initial_retries,
            ..GenerationRequest::new(payload, self.primary_model.clone())
        };
        options.apply(request)
    }

    /// Cultural insights for `destination`.
    pub async fn insights(
        &self,
        destination: &str,
        options: &GenerationOptions,
    ) -> Result<InsightsResult> {
        require("destination", destination)?;
        info!("Generating insights for {}", destination.trim());

        let prompt = prompts::build_insights_prompt(destination);
        let request = self.build_request(Payload::Prompt(prompt), INSIGHTS, options);
        let raw = self.executor.generate(request).await?;

        Ok(parsing::parse_insights(&raw))
    }

    /// Day-by-day itinerary for `destination` tailored to `profile`.
    pub async fn itinerary(
        &self,
        destination: &str,
        profile: &TravelerProfile,
        options: &GenerationOptions,
    ) -> Result<ItineraryResult> {
        require("destination", destination)?;
        if profile.is_empty() {
            return Err(OrchestratorError::Validation(
                "travelerProfile is required".to_string(),
            ));
        }
        info!("Generating itinerary for {}", destination.trim());

        let prompt = prompts::build_itinerary_prompt(destination, profile);
        let request = self.build_request(Payload::Prompt(prompt), ITINERARY, options);
        let raw = self.executor.generate(request).await?;

        Ok(parsing::parse_itinerary(&raw))
    }

    /// Translate `text` between two languages.
    ///
    /// Cached by model, language pair and the first 50 characters of `text`.
    pub async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
        options: &GenerationOptions,
    ) -> Result<TranslationResult> {
        require("text", text)?;
        require("sourceLang", source_lang)?;
        require("targetLang", target_lang)?;
        debug!("Translating {} chars {} -> {}", text.chars().count(), source_lang, target_lang);

        let prompt = prompts::build_translation_prompt(text, source_lang, target_lang);
        let mut request = self.build_request(Payload::Prompt(prompt), TRANSLATION, options);
        request.cache_key = Some(translation_key(
            &request.model,
            source_lang.trim(),
            target_lang.trim(),
            text,
        ));
        let raw = self.executor.generate(request).await?;

        Ok(parsing::parse_translation(&raw))
    }

    /// One multi-turn chat exchange; never cached.
    pub async fn converse(
        &self,
        session_id: Option<&str>,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<ConversationTurn> {
        let template = self.build_request(Payload::Messages(Vec::new()), CHAT, options);
        self.memory
            .converse(&self.executor, session_id, prompt, template)
            .await
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        let metrics = self.metrics.snapshot();
        MetricsSnapshot {
            total_calls: metrics.total_calls,
            successful_calls: metrics.successful_calls,
            failed_calls: metrics.failed_calls,
            average_response_time: metrics.average_response_time,
            success_rate: metrics.success_rate(),
            cache_entries: self.cache.len(),
            active_sessions: self.memory.session_count(),
        }
    }

    pub fn reset_cache(&self) {
        self.cache.clear();
    }

    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Drop a chat session; returns whether it existed.
    pub fn forget_session(&self, session_id: &str) -> bool {
        self.memory.forget(session_id)
    }

    /// Stored messages of a chat session, oldest first.
    pub fn session_history(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        self.memory.history(session_id)
    }

    pub fn session_length(&self, session_id: &str) -> usize {
        self.memory.len(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.memory.session_count()
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OrchestratorError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
