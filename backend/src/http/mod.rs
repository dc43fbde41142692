//! HTTP server module for the relay.
//!
//! This module provides an axum-based HTTP server that exposes the relay
//! operations as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - JSON extraction, rejection → {error}                   │
//! │  - CORS, compression, tracing                             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Relay operations (services::relay)                       │
//! │  - Input validation                                       │
//! │  - One external call per request                          │
//! └───────┬───────────────────┬───────────────────┬──────────┘
//!         │                   │                   │
//!   Classifier           Generator          JournalRepository
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
