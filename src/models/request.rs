// Generation request types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Speaker of a single conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// What gets sent to the backend: a single prompt or a message history.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Prompt(String),
    Messages(Vec<ChatMessage>),
}

impl Payload {
    /// Full text of the payload, used for cache key hashing.
    pub fn text(&self) -> String {
        match self {
            Payload::Prompt(prompt) => prompt.clone(),
            Payload::Messages(messages) => messages
                .iter()
                .map(|m| format!("{}: {}", m.role.as_str(), m.content))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Messages as the backend expects them; a bare prompt becomes one user turn.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        match self {
            Payload::Prompt(prompt) => vec![ChatMessage::user(prompt.clone())],
            Payload::Messages(messages) => messages.clone(),
        }
    }
}

/// Structured-output hint forwarded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
}

/// A single logical generation request.
///
/// Each backend attempt dispatches an immutable view of this request. A
/// fallback escalation produces a new request through [`GenerationRequest::escalate`]
/// rather than mutating the one in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub payload: Payload,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub response_format: Option<ResponseFormat>,
    /// Explicit cache key; when absent one is derived from model and payload.
    pub cache_key: Option<String>,
    pub use_cache: bool,
    pub retries_remaining: u32,
}

impl GenerationRequest {
    pub fn new(payload: Payload, model: impl Into<String>) -> Self {
        Self {
            payload,
            model: model.into(),
            max_tokens: 1024,
            temperature: 0.7,
            top_p: 1.0,
            response_format: None,
            cache_key: None,
            use_cache: true,
            retries_remaining: 3,
        }
    }

    /// Re-target the request at `fallback_model` with a fresh retry budget.
    pub fn escalate(&self, fallback_model: &str, retries: u32) -> Self {
        Self {
            model: fallback_model.to_string(),
            retries_remaining: retries,
            ..self.clone()
        }
    }
}

/// Per-call overrides layered on top of an operation's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub use_cache: Option<bool>,
}

impl GenerationOptions {
    /// Apply these overrides to `request`.
    pub fn apply(&self, mut request: GenerationRequest) -> GenerationRequest {
        if let Some(model) = &self.model {
            request.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            request.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            request.temperature = temperature;
        }
        if let Some(top_p) = self.top_p {
            request.top_p = top_p;
        }
        if let Some(use_cache) = self.use_cache {
            request.use_cache = use_cache;
        }
        request
    }
}
