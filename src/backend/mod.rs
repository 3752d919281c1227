// Inference backend module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod wire;

pub use client::HttpBackend;

use crate::models::{ChatMessage, ResponseFormat};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// One dispatch to the backend, already resolved to a concrete model.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendCall {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub response_format: Option<ResponseFormat>,
}

/// Closed classification of backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendErrorKind {
    Auth,
    RateLimit,
    ModelUnavailable,
    Server,
    Network,
}

impl BackendErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendErrorKind::Auth => "auth",
            BackendErrorKind::RateLimit => "rate_limit",
            BackendErrorKind::ModelUnavailable => "model_unavailable",
            BackendErrorKind::Server => "server",
            BackendErrorKind::Network => "network",
        }
    }

    /// Failures that warrant switching to the fallback model.
    pub fn escalates(&self) -> bool {
        matches!(
            self,
            BackendErrorKind::RateLimit | BackendErrorKind::ModelUnavailable
        )
    }

    /// Classify an HTTP status plus an optional provider error code.
    pub fn from_status(status: u16, code: Option<&str>) -> Self {
        if matches!(code, Some("model_not_found" | "model_decommissioned")) {
            return BackendErrorKind::ModelUnavailable;
        }
        match status {
            401 | 403 => BackendErrorKind::Auth,
            429 => BackendErrorKind::RateLimit,
            404 => BackendErrorKind::ModelUnavailable,
            _ => BackendErrorKind::Server,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Auth, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::RateLimit, message)
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::ModelUnavailable, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Server, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Network, message)
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for BackendError {}

/// Text generation capability the orchestrator depends on.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Generate a completion for `call`, returning the assistant text.
    async fn generate(&self, call: &BackendCall) -> Result<String, BackendError>;

    /// Cheap round trip used by the health endpoint.
    async fn check_connectivity(&self) -> Result<Duration, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(BackendErrorKind::from_status(401, None), BackendErrorKind::Auth);
        assert_eq!(BackendErrorKind::from_status(403, None), BackendErrorKind::Auth);
        assert_eq!(BackendErrorKind::from_status(429, None), BackendErrorKind::RateLimit);
        assert_eq!(
            BackendErrorKind::from_status(404, None),
            BackendErrorKind::ModelUnavailable
        );
        assert_eq!(BackendErrorKind::from_status(500, None), BackendErrorKind::Server);
        assert_eq!(BackendErrorKind::from_status(400, None), BackendErrorKind::Server);
    }

    #[test]
    fn test_error_code_overrides_status() {
        assert_eq!(
            BackendErrorKind::from_status(400, Some("model_decommissioned")),
            BackendErrorKind::ModelUnavailable
        );
    }

    #[test]
    fn test_only_throttling_and_missing_models_escalate() {
        assert!(BackendErrorKind::RateLimit.escalates());
        assert!(BackendErrorKind::ModelUnavailable.escalates());
        assert!(!BackendErrorKind::Auth.escalates());
        assert!(!BackendErrorKind::Server.escalates());
        assert!(!BackendErrorKind::Network.escalates());
    }
}
