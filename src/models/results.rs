//! Structured results returned by the orchestrator.

// Author: kelexine (https://github.com/kelexine)

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Cultural insights for a destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InsightsResult {
    /// Backend output parsed as a JSON document.
    Structured(Value),
    /// Output that was not JSON, split into paragraph sections.
    Sections {
        sections: Vec<String>,
        #[serde(rename = "rawText")]
        raw_text: String,
    },
}

/// A single itinerary day keyed by lower-cased subsection name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayPlan {
    /// Heading text after the `##` marker, e.g. "Day 1: Arrival".
    pub day: String,
    #[serde(flatten)]
    pub sections: BTreeMap<String, String>,
}

impl DayPlan {
    pub fn section(&self, name: &str) -> Option<&str> {
        self.sections.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItineraryResult {
    Structured(Value),
    Days(Vec<DayPlan>),
    /// Output that could not be parsed; the raw text is kept verbatim.
    Unparsed {
        error: String,
        #[serde(rename = "rawText")]
        raw_text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranslationResult {
    Text(String),
    #[serde(rename_all = "camelCase")]
    Annotated {
        translation: String,
        notes: Option<String>,
        cultural_adaptations: Option<String>,
    },
}

impl TranslationResult {
    pub fn translation(&self) -> &str {
        match self {
            TranslationResult::Text(text) => text,
            TranslationResult::Annotated { translation, .. } => translation,
        }
    }
}

/// Outcome of one multi-turn chat exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub session_id: String,
    pub response: String,
    /// Messages retained for the session after truncation.
    pub conversation_length: usize,
}

/// Point-in-time view of backend call accounting.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    /// Running mean over successful calls, in milliseconds.
    pub average_response_time: f64,
    /// Percentage of successful calls, 0 when nothing has been recorded.
    pub success_rate: f64,
    pub cache_entries: usize,
    pub active_sessions: usize,
}
