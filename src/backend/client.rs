// HTTP client for OpenAI-compatible inference backends
// Author: kelexine (https://github.com/kelexine)

use super::wire::{
    ChatCompletionRequest, ChatCompletionResponse, ErrorResponse, WireMessage,
    WireResponseFormat,
};
use super::{BackendCall, BackendError, BackendErrorKind, InferenceBackend};
use crate::config::BackendConfig;
use crate::error::{OrchestratorError, Result};
use crate::models::ResponseFormat;
use crate::utils::logging::sanitize;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for a chat-completions style inference API.
///
/// Every failure is classified into a [`BackendErrorKind`] here, so callers
/// never inspect HTTP details.
pub struct HttpBackend {
    http_client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| OrchestratorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base_url.trim_end_matches('/'))
    }

    /// Extract message and provider code from an error body
    fn extract_error(response_text: &str) -> (Option<String>, Option<String>) {
        match serde_json::from_str::<ErrorResponse>(response_text) {
            Ok(ErrorResponse { error: Some(detail) }) => (detail.message, detail.code),
            _ => (None, None),
        }
    }

    async fn send(&self, call: &BackendCall) -> std::result::Result<String, BackendError> {
        let body = ChatCompletionRequest {
            model: &call.model,
            messages: call
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: call.max_tokens,
            temperature: call.temperature,
            top_p: call.top_p,
            response_format: call.response_format.map(|format| match format {
                ResponseFormat::JsonObject => WireResponseFormat {
                    format_type: "json_object",
                },
            }),
        };

        let mut request = self.http_client.post(self.completions_url()).json(&body);
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            let reason = if e.is_timeout() { "request timed out" } else { "transport failure" };
            BackendError::network(format!("{}: {}", reason, e))
        })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| BackendError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let (message, code) = Self::extract_error(&response_text);
            let kind = BackendErrorKind::from_status(status.as_u16(), code.as_deref());
            error!(
                "Backend error: HTTP {} ({}) - {}",
                status,
                kind.as_str(),
                sanitize(&response_text)
            );
            return Err(BackendError::new(
                kind,
                format!("HTTP {}: {}", status.as_u16(), message.unwrap_or(response_text)),
            ));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| BackendError::server(format!("Response parsing error: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BackendError::server("Response contained no completion"))
    }
}

#[async_trait]
impl InferenceBackend for HttpBackend {
    async fn generate(&self, call: &BackendCall) -> std::result::Result<String, BackendError> {
        debug!(
            "Calling chat completions: model={}, messages={}",
            call.model,
            call.messages.len()
        );
        self.send(call).await
    }

    async fn check_connectivity(&self) -> std::result::Result<Duration, BackendError> {
        let start = Instant::now();
        let call = BackendCall {
            messages: vec![crate::models::ChatMessage::user("hi")],
            model: self.config.primary_model.clone(),
            max_tokens: 1,
            temperature: 0.0,
            top_p: 1.0,
            response_format: None,
        };
        self.send(&call).await?;

        let latency = start.elapsed();
        debug!("Backend connectivity check passed in {:?}", latency);
        Ok(latency)
    }
}
