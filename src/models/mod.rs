//! Data models shared across the orchestration layer.
//!
//! This module contains the type definitions for:
//! - Backend-facing generation requests and chat messages (`request`)
//! - Traveler profiles fed into itinerary prompts (`profile`)
//! - Structured results returned to callers (`results`)

// Author: kelexine (https://github.com/kelexine)

pub mod profile;
pub mod request;
pub mod results;

pub use profile::TravelerProfile;
pub use request::{
    ChatMessage, GenerationOptions, GenerationRequest, Payload, ResponseFormat, Role,
};
pub use results::{
    ConversationTurn, DayPlan, InsightsResult, ItineraryResult, MetricsSnapshot,
    TranslationResult,
};
