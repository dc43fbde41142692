//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies keep every field optional so that missing fields reach the
//! relay validation and come back as `{error}` with status 400.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use crate::api::{
    DashboardSummary, DistortionClassification, DistortionMap, JournalDraft, ReframeResult,
};
pub use crate::db::models::StoredJournalLog;

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub entry: Option<String>,
}

/// Response for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub results: Vec<DistortionClassification>,
    /// Confident results grouped by category
    pub distortion_map: DistortionMap,
}

/// Request body for `POST /generate_reframes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateReframesRequest {
    #[serde(default)]
    pub entry: Option<String>,
    /// Kept as raw JSON; anything other than a non-empty object is rejected
    #[serde(default)]
    pub distortion_map: Option<Value>,
}

/// Request body for `POST /save_entry`.
pub type SaveEntryRequest = JournalDraft;

/// Response for `POST /save_entry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEntryResponse {
    pub status: String,
}

impl SaveEntryResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Response for `GET /journal_logs/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLogListResponse {
    pub logs: Vec<StoredJournalLog>,
    pub total: usize,
}

/// Response for `GET /dashboard/{user_id}`:
/// `{distortion_counts: [{date, <distortion>: n}], mood: [{date, mood}]}`.
pub type DashboardResponse = DashboardSummary;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the crate
    pub version: String,
    /// Journal store connection status
    pub store: String,
}
