//! In-memory local repository implementation.
//!
//! This module provides a local implementation of [`JournalRepository`]
//! suitable for unit testing and local development. Records live in a `Vec`
//! behind a lock, giving fast, deterministic and isolated execution.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

use crate::api::JournalLogRecord;
use crate::db::models::StoredJournalLog;
use crate::db::repository::{JournalRepository, RepositoryError, RepositoryResult};

/// In-memory local repository.
///
/// # Example
/// ```
/// use reframe_relay::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert!(repo.is_empty());
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    // Insertion order, oldest first.
    logs: Vec<StoredJournalLog>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Simulate the store going down or coming back.
    ///
    /// While unhealthy every operation fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of stored records across all users.
    pub fn len(&self) -> usize {
        self.data.read().logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored record, oldest first.
    pub fn all_logs(&self) -> Vec<StoredJournalLog> {
        self.data.read().logs.clone()
    }

    fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection("Local repository is unavailable")
                .with_operation(operation))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JournalRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn insert_journal_log(&self, record: &JournalLogRecord) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data, "insert_journal_log")?;

        data.logs.push(StoredJournalLog {
            id: Some(Value::String(uuid::Uuid::new_v4().to_string())),
            created_at: Some(Utc::now()),
            record: record.clone(),
        });
        Ok(())
    }

    async fn list_journal_logs(&self, user_id: &str) -> RepositoryResult<Vec<StoredJournalLog>> {
        let data = self.data.read();
        Self::ensure_healthy(&data, "list_journal_logs")?;

        Ok(data
            .logs
            .iter()
            .rev()
            .filter(|log| log.record.user_id == user_id)
            .cloned()
            .collect())
    }
}
