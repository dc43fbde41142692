//! Repository trait for the journal store.
//!
//! The store is insert-only from the relay's point of view: records are
//! written once and read back for listing, never updated or deleted.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::JournalLogRecord;
use crate::db::models::StoredJournalLog;

/// Repository trait for journal log persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; a single instance is shared by
/// every request handler.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store answered
    /// - `Ok(false)` if it answered with a failure status
    /// - `Err(RepositoryError)` if it could not be reached
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert one journal record.
    ///
    /// No identifier or echo of the row is returned.
    async fn insert_journal_log(&self, record: &JournalLogRecord) -> RepositoryResult<()>;

    /// List every record for `user_id`, newest first.
    async fn list_journal_logs(&self, user_id: &str) -> RepositoryResult<Vec<StoredJournalLog>>;
}
