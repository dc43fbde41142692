//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{LocalRepository, SupabaseConfig, SupabaseRepository};
use super::repository::{JournalRepository, RepositoryError, RepositoryResult};
use crate::config::{Credentials, StoreSettings};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Hosted Supabase table
    Supabase,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("supabase", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supabase" | "postgrest" => Ok(Self::Supabase),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl fmt::Display for RepositoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supabase => f.write_str("supabase"),
            Self::Local => f.write_str("local"),
        }
    }
}

impl RepositoryType {
    /// Resolve the repository type from store settings.
    ///
    /// An explicit `type` wins. Otherwise Supabase is assumed, so a missing
    /// URL fails at startup. The in-memory store is never picked implicitly.
    pub fn from_settings(settings: &StoreSettings) -> RepositoryResult<Self> {
        match settings.repo_type {
            Some(ref explicit) => explicit
                .parse::<Self>()
                .map_err(RepositoryError::configuration),
            None => Ok(Self::Supabase),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use reframe_relay::config::RelayConfig;
/// use reframe_relay::db::RepositoryFactory;
///
/// let config = RelayConfig::load()?;
/// let repo = RepositoryFactory::from_settings(&config.store, &config.credentials)?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the repository selected by `settings`.
    pub fn from_settings(
        settings: &StoreSettings,
        credentials: &Credentials,
    ) -> RepositoryResult<Arc<dyn JournalRepository>> {
        match RepositoryType::from_settings(settings)? {
            RepositoryType::Supabase => {
                let key = credentials
                    .supabase_service_key()
                    .map_err(|e| RepositoryError::configuration(e.to_string()))?;
                let config = SupabaseConfig::from_settings(settings, key)?;
                let repo = Self::create_supabase(&config)?;
                Ok(repo as Arc<dyn JournalRepository>)
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a Supabase repository.
    pub fn create_supabase(config: &SupabaseConfig) -> RepositoryResult<Arc<SupabaseRepository>> {
        Ok(Arc::new(SupabaseRepository::new(config)?))
    }

    /// Create a local in-memory repository.
    pub fn create_local() -> Arc<dyn JournalRepository> {
        Arc::new(LocalRepository::new())
    }
}
