//! Database-specific models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::JournalLogRecord;

/// A journal record as read back from the store.
///
/// `id` and `created_at` are assigned by the store; the id is kept as raw
/// JSON because hosted tables use either integer or UUID keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredJournalLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub record: JournalLogRecord,
}
