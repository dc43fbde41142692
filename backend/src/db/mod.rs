//! Database module for journal log storage.
//!
//! This module provides abstractions for journal persistence via the
//! Repository pattern, allowing the hosted store and an in-memory store to be
//! swapped freely.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Relay operations (services::relay)                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository) - Abstract Interface     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!        ┌────────────┴────────────┐
//!        │                         │
//! ┌──────▼──────────┐     ┌────────▼────────┐
//! │ Supabase        │     │ Local           │
//! │ (PostgREST)     │     │ (in-memory)     │
//! └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Module Organization
//! - `repository`: Trait definition and error types
//! - `repositories::supabase`: hosted Supabase implementation
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `factory`: Factory for creating repository instances from configuration

pub mod factory;
pub mod models;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use models::StoredJournalLog;
pub use repositories::{LocalRepository, SupabaseConfig, SupabaseRepository};
pub use repository::{ErrorContext, JournalRepository, RepositoryError, RepositoryResult};
