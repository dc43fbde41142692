//! The relay operations.
//!
//! Each relay validates its input, makes exactly one call to its external
//! service and reshapes the result. No retries, no intermediate state.

use serde_json::Value;

use super::classifier::Classifier;
use super::error::{RelayError, RelayResult, UpstreamService};
use super::generator::Generator;
use super::prompt::build_reframe_prompt;
use super::reframes::parse_reframes;
use super::sentences::split_sentences;
use crate::api::{
    distortion_map_from, DistortionClassification, DistortionMap, JournalDraft, ReframeResult,
};
use crate::db::models::StoredJournalLog;
use crate::db::repository::JournalRepository;

/// Outcome of classifying a journal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryAnalysis {
    pub results: Vec<DistortionClassification>,
    /// Confident results grouped by category, ready for reframe generation.
    pub distortion_map: DistortionMap,
}

/// Split an entry into sentences and classify each one.
pub async fn analyze_entry(
    classifier: &dyn Classifier,
    entry: &str,
    min_confidence: f64,
) -> RelayResult<EntryAnalysis> {
    if entry.is_empty() {
        return Err(RelayError::invalid_input("No journal entry provided."));
    }

    let sentences = split_sentences(entry);
    if sentences.is_empty() {
        return Err(RelayError::invalid_input("Journal entry contains no sentences."));
    }

    log::debug!("Classifying {} sentence(s)", sentences.len());
    let results = classifier.classify(&sentences).await.map_err(|e| {
        log::error!("Classification failed: {}", e);
        RelayError::from(e)
    })?;

    let distortion_map = distortion_map_from(&results, min_confidence);
    Ok(EntryAnalysis {
        results,
        distortion_map,
    })
}

/// Ask the generator for a reframe and question per detected distortion.
///
/// `distortion_map` must be a non-empty JSON object.
pub async fn generate_reframes(
    generator: &dyn Generator,
    entry: &str,
    distortion_map: &Value,
) -> RelayResult<ReframeResult> {
    let map = match distortion_map {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(RelayError::invalid_input("Missing entry or distortion map.")),
    };
    if entry.is_empty() {
        return Err(RelayError::invalid_input("Missing entry or distortion map."));
    }

    let prompt = build_reframe_prompt(entry, map);
    let text = generator.generate(&prompt).await.map_err(|e| {
        log::error!("Reframe generation failed: {}", e);
        RelayError::from(e)
    })?;
    log::debug!("Generator raw output: {}", text);

    parse_reframes(&text).map_err(|e| {
        log::warn!("Generator output is not a reframe object: {}", e);
        RelayError::MalformedOutput {
            message: e.message,
            raw_output: e.raw_output,
        }
    })
}

/// Validate a journal draft and insert it into the store.
pub async fn save_entry(
    repository: &dyn JournalRepository,
    draft: JournalDraft,
) -> RelayResult<()> {
    let record = draft.into_record()?;

    repository.insert_journal_log(&record).await.map_err(|e| {
        log::error!("Saving journal entry failed: {}", e);
        RelayError::from(e)
    })?;
    log::info!("Saved journal entry for user {}", record.user_id);
    Ok(())
}

/// List a user's saved journal entries, newest first.
pub async fn list_entries(
    repository: &dyn JournalRepository,
    user_id: &str,
) -> RelayResult<Vec<StoredJournalLog>> {
    if user_id.trim().is_empty() {
        return Err(RelayError::invalid_input("Missing user_id"));
    }

    repository.list_journal_logs(user_id).await.map_err(|e| {
        log::error!("Listing journal entries failed: {}", e);
        RelayError::upstream(UpstreamService::StoreRead, e.to_string())
    })
}
