//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the relay
//! operations in the service layer. JSON extraction failures are turned into
//! `{error}` responses instead of the framework defaults.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use super::dto::{
    AnalyzeRequest, AnalyzeResponse, DashboardResponse, GenerateReframesRequest, HealthResponse,
    JournalLogListResponse, ReframeResult, SaveEntryRequest, SaveEntryResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::{dashboard, relay};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store_status,
    })
}

// =============================================================================
// Relays
// =============================================================================

/// POST /analyze
///
/// Split the entry into sentences and classify each one.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> HandlerResult<AnalyzeResponse> {
    let Json(request) = payload?;
    let entry = request.entry.unwrap_or_default();

    let analysis = relay::analyze_entry(
        state.classifier.as_ref(),
        &entry,
        state.analysis.min_confidence,
    )
    .await?;

    Ok(Json(AnalyzeResponse {
        results: analysis.results,
        distortion_map: analysis.distortion_map,
    }))
}

/// POST /generate_reframes
///
/// Generate a reframe and reflection question per distortion. The parsed
/// model object is returned as the response body.
pub async fn generate_reframes(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReframesRequest>, JsonRejection>,
) -> HandlerResult<ReframeResult> {
    let Json(request) = payload?;
    let entry = request.entry.unwrap_or_default();
    let distortion_map = request.distortion_map.unwrap_or(Value::Null);

    let reframes =
        relay::generate_reframes(state.generator.as_ref(), &entry, &distortion_map).await?;
    Ok(Json(reframes))
}

/// POST /save_entry
///
/// Persist one journal record.
pub async fn save_entry(
    State(state): State<AppState>,
    payload: Result<Json<SaveEntryRequest>, JsonRejection>,
) -> HandlerResult<SaveEntryResponse> {
    let Json(draft) = payload?;
    relay::save_entry(state.repository.as_ref(), draft).await?;
    Ok(Json(SaveEntryResponse::success()))
}

/// GET /journal_logs/{user_id}
///
/// List a user's saved journal records, newest first.
pub async fn list_journal_logs(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<JournalLogListResponse> {
    let logs = relay::list_entries(state.repository.as_ref(), &user_id).await?;
    let total = logs.len();
    Ok(Json(JournalLogListResponse { logs, total }))
}

/// GET /dashboard/{user_id}
///
/// Per-day distortion counts and the mood series for a user.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> HandlerResult<DashboardResponse> {
    let summary = dashboard::load_dashboard(state.repository.as_ref(), &user_id).await?;
    Ok(Json(summary))
}
