// Error types for the wayfarer orchestration service
// Author: kelexine (https://github.com/kelexine)

use crate::backend::{BackendError, BackendErrorKind};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication with the inference backend failed: {0}")]
    Auth(String),

    #[error("Inference backend rate limit exceeded, try again later: {0}")]
    RateLimit(String),

    #[error("Requested model is not available: {0}")]
    ModelUnavailable(String),

    #[error("Inference backend failed to process the request: {0}")]
    Server(String),

    #[error("Could not reach the inference backend: {0}")]
    Network(String),

    #[error("Could not process backend output: {0}")]
    Processing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrchestratorError {
    /// Stable machine-readable name used in HTTP error bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            OrchestratorError::Validation(_) => "invalid_request_error",
            OrchestratorError::Auth(_) => "authentication_error",
            OrchestratorError::RateLimit(_) => "rate_limit_error",
            OrchestratorError::ModelUnavailable(_) => "model_unavailable_error",
            OrchestratorError::Server(_) | OrchestratorError::Network(_) => "api_error",
            OrchestratorError::Processing(_) => "processing_error",
            OrchestratorError::Config(_) | OrchestratorError::ConfigParsing(_) => {
                "configuration_error"
            }
            _ => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            OrchestratorError::Validation(_) => StatusCode::BAD_REQUEST,
            OrchestratorError::Auth(_) => StatusCode::UNAUTHORIZED,
            OrchestratorError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            OrchestratorError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            OrchestratorError::Server(_) | OrchestratorError::Network(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Terminal backend failures surface as the matching taxonomy variant
impl From<BackendError> for OrchestratorError {
    fn from(err: BackendError) -> Self {
        match err.kind {
            BackendErrorKind::Auth => OrchestratorError::Auth(err.message),
            BackendErrorKind::RateLimit => OrchestratorError::RateLimit(err.message),
            BackendErrorKind::ModelUnavailable => OrchestratorError::ModelUnavailable(err.message),
            BackendErrorKind::Server => OrchestratorError::Server(err.message),
            BackendErrorKind::Network => OrchestratorError::Network(err.message),
        }
    }
}

// Convert OrchestratorError to HTTP responses for Axum
impl IntoResponse for OrchestratorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "type": "error",
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
