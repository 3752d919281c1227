// Shared test doubles
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use wayfarer::backend::{BackendCall, BackendError, InferenceBackend};
use wayfarer::config::AppConfig;
use wayfarer::orchestrator::RequestOrchestrator;

pub const PRIMARY: &str = "llama-3.3-70b-versatile";
pub const FALLBACK: &str = "llama-3.1-8b-instant";

/// Backend that replays queued replies and records every call.
///
/// Once the queue is empty it keeps answering with the last queued reply,
/// or `"ok"` if nothing was ever queued.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, BackendError>>>,
    last: Mutex<Option<Result<String, BackendError>>>,
    calls: Mutex<Vec<(Instant, BackendCall)>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Self::with_replies(Vec::new())
    }

    pub fn with_replies(replies: Vec<Result<String, BackendError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::with_replies(vec![Ok(text.to_string())])
    }

    pub fn push(&self, reply: Result<String, BackendError>) {
        self.replies.lock().push_back(reply);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().iter().map(|(_, call)| call.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(at, _)| *at).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn models(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.model).collect()
    }

    fn next_reply(&self) -> Result<String, BackendError> {
        let mut replies = self.replies.lock();
        let mut last = self.last.lock();
        match replies.pop_front() {
            Some(reply) => {
                *last = Some(reply.clone());
                reply
            }
            None => last.clone().unwrap_or_else(|| Ok("ok".to_string())),
        }
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn generate(&self, call: &BackendCall) -> Result<String, BackendError> {
        self.calls.lock().push((Instant::now(), call.clone()));
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply()
    }

    async fn check_connectivity(&self) -> Result<Duration, BackendError> {
        Ok(Duration::from_millis(1))
    }
}

pub fn orchestrator(backend: &Arc<ScriptedBackend>) -> RequestOrchestrator {
    orchestrator_with(&AppConfig::default(), backend)
}

pub fn orchestrator_with(config: &AppConfig, backend: &Arc<ScriptedBackend>) -> RequestOrchestrator {
    RequestOrchestrator::from_config(config, backend.clone())
}
