// Per-session bounded message history
// Author: kelexine (https://github.com/kelexine)
//
// Sessions live for the life of the process; nothing evicts a whole session
// except an explicit `forget`.

use crate::config::ConversationConfig;
use crate::error::{OrchestratorError, Result};
use crate::models::{ChatMessage, ConversationTurn, GenerationRequest, Payload};
use crate::orchestrator::RetryExecutor;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct ConversationMemory {
    max_messages: usize,
    sessions: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl ConversationMemory {
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &ConversationConfig) -> Self {
        Self::new(config.max_messages)
    }

    /// Run one chat turn for `session_id`, creating the session if needed.
    ///
    /// `template` supplies model and sampling settings; its payload is
    /// replaced by the session history and caching is always disabled.
    /// If the backend fails, the user message stays in the history.
    pub async fn converse(
        &self,
        executor: &RetryExecutor,
        session_id: Option<&str>,
        prompt: &str,
        template: GenerationRequest,
    ) -> Result<ConversationTurn> {
        if prompt.trim().is_empty() {
            return Err(OrchestratorError::Validation("prompt is required".to_string()));
        }

        let session_id = match session_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        let history = self.append(&session_id, ChatMessage::user(prompt));
        debug!(
            "Conversation {}: sending {} message(s)",
            session_id,
            history.len()
        );

        let request = GenerationRequest {
            payload: Payload::Messages(history),
            cache_key: None,
            use_cache: false,
            ..template
        };

        let response = executor.generate(request).await.map_err(|e| {
            warn!("Conversation {} turn failed: {}", session_id, e);
            e
        })?;

        self.append(&session_id, ChatMessage::assistant(response.clone()));
        let conversation_length = self.len(&session_id);

        Ok(ConversationTurn {
            session_id,
            response,
            conversation_length,
        })
    }

    /// Append a message, truncate to the newest `max_messages`, and return
    /// the resulting history.
    pub fn append(&self, session_id: &str, message: ChatMessage) -> Vec<ChatMessage> {
        let mut sessions = self.sessions.lock();
        let created = !sessions.contains_key(session_id);
        let messages = sessions.entry(session_id.to_string()).or_default();
        messages.push(message);
        if messages.len() > self.max_messages {
            let excess = messages.len() - self.max_messages;
            messages.drain(..excess);
        }
        let history = messages.clone();

        if created {
            crate::metrics::update_conversation_sessions(sessions.len());
        }
        history
    }

    /// Stored messages for a session, oldest first.
    pub fn history(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        self.sessions.lock().get(session_id).cloned()
    }

    /// Number of stored messages, 0 for unknown sessions.
    pub fn len(&self, session_id: &str) -> usize {
        self.sessions.lock().get(session_id).map_or(0, Vec::len)
    }

    /// Drop a session; returns whether it existed.
    pub fn forget(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock();
        let removed = sessions.remove(session_id).is_some();
        crate::metrics::update_conversation_sessions(sessions.len());
        removed
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn clear(&self) {
        self.sessions.lock().clear();
        crate::metrics::update_conversation_sessions(0);
    }
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::from_config(&ConversationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncates_oldest_first() {
        let memory = ConversationMemory::new(3);
        for i in 0..5 {
            memory.append("s", ChatMessage::user(format!("m{}", i)));
        }

        let history = memory.history("s").unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_forget() {
        let memory = ConversationMemory::default();
        memory.append("s", ChatMessage::user("hi"));
        assert_eq!(memory.session_count(), 1);

        assert!(memory.forget("s"));
        assert!(!memory.forget("s"));
        assert_eq!(memory.len("s"), 0);
        assert!(memory.history("s").is_none());
    }

    proptest! {
        #[test]
        fn prop_history_is_newest_suffix(count in 0usize..40) {
            let memory = ConversationMemory::new(10);
            for i in 0..count {
                let history = memory.append("s", ChatMessage::user(i.to_string()));
                prop_assert!(history.len() <= 10);
            }

            let expected: Vec<String> = (count.saturating_sub(10)..count).map(|i| i.to_string()).collect();
            let stored: Vec<String> = memory
                .history("s")
                .unwrap_or_default()
                .into_iter()
                .map(|m| m.content)
                .collect();
            prop_assert_eq!(stored, expected);
        }
    }
}
