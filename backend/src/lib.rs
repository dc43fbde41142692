//! # Reframe Relay
//!
//! Backend relay for CBT-style journaling.
//!
//! A journal entry is split into sentences and sent to a hosted classifier
//! to detect cognitive distortions; the detected distortions are sent to a
//! hosted generative model for reframes and reflection questions; the entry
//! and results are then stored in a hosted database. All three steps are thin
//! adapters over external services, exposed as a REST API via Axum.
//!
//! ## Architecture
//!
//! - [`api`]: Domain types shared across layers
//! - [`config`]: TOML + environment configuration
//! - [`services`]: Relay operations and external-service clients
//! - [`db`]: Journal repository trait and implementations
//! - `http`: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
