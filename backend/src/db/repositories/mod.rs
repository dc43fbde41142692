//! Repository implementations module.
//!
//! This module contains the implementations of the `JournalRepository` trait:
//! - `supabase`: hosted Supabase table via PostgREST
//! - `local`: In-memory implementation for unit testing and local development
pub mod local;
pub mod supabase;

pub use local::LocalRepository;
pub use supabase::{SupabaseConfig, SupabaseRepository};
