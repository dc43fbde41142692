//! Per-user journal aggregates for the dashboard charts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::error::RelayResult;
use super::relay::list_entries;
use crate::api::{DailyDistortionCounts, DashboardSummary, JournalLogRecord, MoodPoint};
use crate::db::models::StoredJournalLog;
use crate::db::repository::JournalRepository;

fn day_label(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Aggregate stored logs into per-day distortion counts and a mood series.
///
/// Logs without a `created_at` cannot be placed on a day and are skipped.
/// Non-string entries in `detected_distortions` are ignored.
pub fn summarize_logs(logs: &[StoredJournalLog]) -> DashboardSummary {
    let mut dated: Vec<(DateTime<Utc>, &JournalLogRecord)> = logs
        .iter()
        .filter_map(|log| log.created_at.map(|at| (at, &log.record)))
        .collect();
    dated.sort_by_key(|(at, _)| *at);

    // First-appearance order of distortion names.
    let mut names: Vec<&str> = Vec::new();
    let mut days: Vec<(String, HashMap<&str, u64>)> = Vec::new();
    let mut mood = Vec::new();

    for (at, record) in dated {
        let date = day_label(at);
        if days.last().map_or(true, |(day, _)| *day != date) {
            days.push((date.clone(), HashMap::new()));
        }
        let idx = days.len() - 1;
        let counts = &mut days[idx].1;

        for name in record.detected_distortions.iter().filter_map(Value::as_str) {
            if !names.contains(&name) {
                names.push(name);
            }
            *counts.entry(name).or_insert(0) += 1;
        }

        if let Some(reading) = record.mood {
            mood.push(MoodPoint {
                date,
                mood: reading,
            });
        }
    }

    let distortion_counts = days
        .into_iter()
        .map(|(date, counts)| DailyDistortionCounts {
            date,
            counts: names
                .iter()
                .map(|name| {
                    let n = counts.get(name).copied().unwrap_or(0);
                    (name.to_string(), Value::from(n))
                })
                .collect(),
        })
        .collect();

    DashboardSummary {
        distortion_counts,
        mood,
    }
}

/// Load a user's logs and aggregate them.
pub async fn load_dashboard(
    repository: &dyn JournalRepository,
    user_id: &str,
) -> RelayResult<DashboardSummary> {
    let logs = list_entries(repository, user_id).await?;
    log::debug!("Summarizing {} journal log(s) for dashboard", logs.len());
    Ok(summarize_logs(&logs))
}
