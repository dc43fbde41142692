//! Reframe relay HTTP server binary.
//!
//! This is the main entry point for the relay REST API server.
//! It loads configuration, builds the external-service clients, sets up the
//! HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # In-memory journal store
//! REPOSITORY_TYPE=local COHERE_API_KEY=... GEMINI_API_KEY=... cargo run --bin reframe-server
//!
//! # Supabase journal store
//! SUPABASE_URL=https://abc.supabase.co SUPABASE_SERVICE_ROLE_KEY=... \
//!   COHERE_API_KEY=... GEMINI_API_KEY=... cargo run --bin reframe-server
//! ```
//!
//! Variables may also be placed in a `.env` file. See `reframe_relay::config`
//! for the full list.
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use reframe_relay::config::RelayConfig;
use reframe_relay::db::RepositoryType;
use reframe_relay::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting reframe relay");

    let config = RelayConfig::load()?;
    info!(
        classifier_model = %config.classifier.model,
        generator_model = %config.generator.model,
        "Configuration loaded"
    );

    let store = RepositoryType::from_settings(&config.store)?;
    info!(store = %store, table = %config.store.table, "Journal store selected");
    if store == RepositoryType::Local {
        warn!("In-memory journal store: entries are lost on restart");
    }

    let state = AppState::from_config(&config)?;
    info!("External service clients initialized");

    let app = create_router(state);

    let addr = config.server.bind_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
