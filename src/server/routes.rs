// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    chat_handler, forget_session_handler, health_handler, insights_handler, itinerary_handler,
    metrics_handler, prometheus_handler, reset_cache_handler, translate_handler,
};
use super::middleware::request_id_layers;
use crate::backend::InferenceBackend;
use crate::config::AppConfig;
use crate::orchestrator::RequestOrchestrator;
use axum::{routing::{delete, get, post}, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub orchestrator: Arc<RequestOrchestrator>,
    pub backend: Arc<dyn InferenceBackend>,
}

pub fn create_router(
    config: AppConfig,
    orchestrator: Arc<RequestOrchestrator>,
    backend: Arc<dyn InferenceBackend>,
) -> Router {
    let state = AppState {
        config,
        orchestrator,
        backend,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(prometheus_handler))
        .route("/api/insights", post(insights_handler))
        .route("/api/itinerary", post(itinerary_handler))
        .route("/api/translate", post(translate_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/:session_id", delete(forget_session_handler))
        .route("/api/metrics", get(metrics_handler))
        .route("/api/cache/reset", post(reset_cache_handler))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
