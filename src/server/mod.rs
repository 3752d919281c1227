//! Axum-based HTTP server for the wayfarer service.
//!
//! Thin glue over [`RequestOrchestrator`](crate::orchestrator::RequestOrchestrator):
//! handlers deserialize JSON bodies, call one orchestrator operation and
//! serialize the result. Errors render through `OrchestratorError`.
//!
//! # Components
//!
//! - `handlers`: One function per endpoint (insights, itinerary, translate, chat, metrics).
//! - `middleware`: Request ID tracking layers.
//! - `routes`: The router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{ChatRequest, InsightsRequest, ItineraryRequest, TranslateRequest};
pub use routes::{create_router, AppState};
