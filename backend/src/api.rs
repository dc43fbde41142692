//! Public API surface for the relay.
//!
//! This file consolidates the domain types shared by the service layer, the
//! journal store and the HTTP API. All types derive Serialize/Deserialize for
//! JSON serialization.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::services::error::{RelayError, RelayResult};

/// Distortion category name mapped to the evidence that triggered it.
///
/// Supplied by callers of the reframe relay; values are usually lists of
/// sentences but are passed to the model as-is.
pub type DistortionMap = Map<String, Value>;

/// Model-produced reframes keyed by distortion category.
///
/// Each value is expected to look like `{"reframe": ..., "question": ...}`
/// but is passed through without per-field validation.
pub type ReframeResult = Map<String, Value>;

/// One classified sentence of a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistortionClassification {
    pub sentence: String,
    pub predicted_distortion: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Group classifications by predicted distortion, keeping only those at or
/// above `min_confidence`.
///
/// Categories appear in the order their first sentence was classified and
/// sentences within a category keep classification order.
pub fn distortion_map_from(
    classifications: &[DistortionClassification],
    min_confidence: f64,
) -> DistortionMap {
    let mut map = DistortionMap::new();
    for c in classifications.iter().filter(|c| c.confidence >= min_confidence) {
        let entry = map
            .entry(c.predicted_distortion.clone())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(sentences) = entry {
            sentences.push(Value::String(c.sentence.clone()));
        }
    }
    map
}

/// Self-reported mood on a 1 (very sad) to 5 (very happy) scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mood(u8);

impl Mood {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Mood(value as u8))
        } else {
            None
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Journal record as written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLogRecord {
    pub user_id: String,
    pub entry_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detected_distortions: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_reframes: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_reflections: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

// Store rows may hold SQL NULL in JSON columns.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Distortion tallies for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDistortionCounts {
    /// `YYYY-MM-DD`, UTC.
    pub date: String,
    /// Distortion name to occurrences that day. Every distortion the user has
    /// logged is present, zero when absent that day.
    #[serde(flatten)]
    pub counts: Map<String, Value>,
}

/// One self-reported mood reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
    pub date: String,
    pub mood: Mood,
}

/// Chart-ready aggregates over a user's journal, oldest day first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub distortion_counts: Vec<DailyDistortionCounts>,
    pub mood: Vec<MoodPoint>,
}

/// Unvalidated save request. Every field is optional on the wire so that
/// missing required fields surface as client errors rather than decode errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalDraft {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub entry_text: Option<String>,
    #[serde(default)]
    pub detected_distortions: Option<Vec<Value>>,
    #[serde(default)]
    pub ai_reframes: Option<Map<String, Value>>,
    #[serde(default)]
    pub user_reflections: Option<Map<String, Value>>,
    #[serde(default)]
    pub mood: Option<i64>,
}

impl JournalDraft {
    /// Check required fields and fill defaults for the optional ones.
    pub fn into_record(self) -> RelayResult<JournalLogRecord> {
        let user_id = self.user_id.filter(|s| !s.is_empty());
        let entry_text = self.entry_text.filter(|s| !s.is_empty());
        let (Some(user_id), Some(entry_text)) = (user_id, entry_text) else {
            return Err(RelayError::invalid_input("Missing user_id or entry_text"));
        };

        let mood = match self.mood {
            Some(raw) => Some(Mood::new(raw).ok_or_else(|| {
                RelayError::invalid_input(format!(
                    "mood must be between {} and {}",
                    Mood::MIN,
                    Mood::MAX
                ))
            })?),
            None => None,
        };

        Ok(JournalLogRecord {
            user_id,
            entry_text,
            detected_distortions: self.detected_distortions.unwrap_or_default(),
            ai_reframes: self.ai_reframes.unwrap_or_default(),
            user_reflections: self.user_reflections.unwrap_or_default(),
            mood,
        })
    }
}
