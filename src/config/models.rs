//! Configuration data structures for the wayfarer service.
//!
//! This module defines the schema for the application settings: the HTTP
//! listener, the upstream inference backend, and the tuning knobs of the
//! cache, retry and conversation layers.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream inference backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Retry and fallback budget.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Multi-turn chat memory settings.
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream chat-completions backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with every request. Empty disables the header.
    #[serde(default)]
    pub api_key: String,

    /// Model used for every request unless overridden per call.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model substituted after rate limiting or an unavailable primary model.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Per-attempt request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

/// Settings for the in-memory response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether responses are cached at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entry lifetime in seconds.
    /// Default: `3600`
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retry budget of a fresh request.
    /// Default: `3`
    #[serde(default = "default_initial_retries")]
    pub initial_retries: u32,

    /// Retry budget granted when escalating to the fallback model.
    /// Default: `2`
    #[serde(default = "default_fallback_retries")]
    pub fallback_retries: u32,

    /// Backoff unit; the delay grows by this amount with every attempt.
    /// Default: `2000`
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Most recent messages kept per session.
    /// Default: `10`
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: String::new(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_ttl(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_retries: default_initial_retries(),
            fallback_retries: default_fallback_retries(),
            backoff_base_ms: default_backoff_base(),
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

pub(crate) fn default_primary_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

pub(crate) fn default_fallback_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_ttl() -> u64 {
    3600 // 1 hour
}

fn default_initial_retries() -> u32 {
    3
}

fn default_fallback_retries() -> u32 {
    2
}

fn default_backoff_base() -> u64 {
    2000
}

fn default_max_messages() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
