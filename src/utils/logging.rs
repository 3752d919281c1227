//! Structured logging and secret-redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper that keeps
//! backend API keys out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::{OrchestratorError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };

    installed.map_err(|e| OrchestratorError::Internal(format!("Failed to install logger: {}", e)))
}

/// Sanitizes API keys from log messages.
///
/// Scans for the bearer key prefixes used by OpenAI-compatible providers
/// (`gsk_`, `sk-`) and replaces each key with `[REDACTED_API_KEY]`.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    for prefix in ["gsk_", "sk-"] {
        let mut from = 0;
        while let Some(offset) = result[from..].find(prefix) {
            let start = from + offset;
            // Only redact at a word boundary ("task-force" is not a key)
            let at_boundary = result[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            if !at_boundary {
                from = start + prefix.len();
                continue;
            }
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED_API_KEY]");
            from = start + "[REDACTED_API_KEY]".len();
        }
    }

    result
}
