// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::OrchestratorError;
use crate::models::{
    ConversationTurn, GenerationOptions, InsightsResult, ItineraryResult, MetricsSnapshot,
    TranslationResult, TravelerProfile,
};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

// Required fields default to empty so the orchestrator reports them as
// validation errors instead of axum rejecting the body

#[derive(Debug, Default, Deserialize)]
pub struct InsightsRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub traveler_profile: TravelerProfile,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let backend_check = match state.backend.check_connectivity().await {
        Ok(latency) => HealthCheck {
            status: "ok".to_string(),
            message: format!("Backend reachable in {}ms", latency.as_millis()),
        },
        Err(e) => {
            warn!("Health check failed: {}", e);
            overall_status = HealthStatus::Unhealthy;
            HealthCheck {
                status: "error".to_string(),
                message: e.to_string(),
            }
        }
    };
    checks.insert("backend".to_string(), backend_check);

    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "API base: {}, models: {} / {}",
            state.config.backend.api_base_url,
            state.config.backend.primary_model,
            state.config.backend.fallback_model
        ),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn insights_handler(
    State(state): State<AppState>,
    Json(req): Json<InsightsRequest>,
) -> Result<Json<InsightsResult>, OrchestratorError> {
    info!("Received insights request: destination={}", req.destination);
    let result = state
        .orchestrator
        .insights(&req.destination, &req.options)
        .await?;
    Ok(Json(result))
}

pub async fn itinerary_handler(
    State(state): State<AppState>,
    Json(req): Json<ItineraryRequest>,
) -> Result<Json<ItineraryResult>, OrchestratorError> {
    info!("Received itinerary request: destination={}", req.destination);
    let result = state
        .orchestrator
        .itinerary(&req.destination, &req.traveler_profile, &req.options)
        .await?;
    Ok(Json(result))
}

pub async fn translate_handler(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslationResult>, OrchestratorError> {
    info!(
        "Received translate request: {} -> {}",
        req.source_lang, req.target_lang
    );
    let result = state
        .orchestrator
        .translate(&req.text, &req.source_lang, &req.target_lang, &req.options)
        .await?;
    Ok(Json(result))
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ConversationTurn>, OrchestratorError> {
    let turn = state
        .orchestrator
        .converse(req.session_id.as_deref(), &req.prompt, &req.options)
        .await?;
    Ok(Json(turn))
}

pub async fn forget_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    let deleted = state.orchestrator.forget_session(&session_id);
    Json(json!({ "sessionId": session_id, "deleted": deleted }))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.orchestrator.metrics())
}

pub async fn prometheus_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

pub async fn reset_cache_handler(State(state): State<AppState>) -> Json<Value> {
    state.orchestrator.reset_cache();
    info!("Response cache cleared");
    Json(json!({ "cleared": true }))
}
