//! Application state for the HTTP server.

use std::sync::Arc;

use anyhow::Context;

use crate::config::{AnalysisSettings, RelayConfig};
use crate::db::repository::JournalRepository;
use crate::db::RepositoryFactory;
use crate::services::{Classifier, CohereClassifier, GeminiGenerator, Generator};

/// Shared application state passed to all handlers.
///
/// One handle per external service, built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Sentence classifier used by `/analyze`
    pub classifier: Arc<dyn Classifier>,
    /// Text generator used by `/generate_reframes`
    pub generator: Arc<dyn Generator>,
    /// Journal store used by `/save_entry` and `/journal_logs`
    pub repository: Arc<dyn JournalRepository>,
    pub analysis: AnalysisSettings,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl AppState {
    /// Create a new application state with the given service handles and
    /// default analysis settings.
    pub fn new(
        classifier: Arc<dyn Classifier>,
        generator: Arc<dyn Generator>,
        repository: Arc<dyn JournalRepository>,
    ) -> Self {
        Self {
            classifier,
            generator,
            repository,
            analysis: AnalysisSettings::default(),
            body_limit: crate::config::ServerSettings::default().body_limit_bytes,
        }
    }

    pub fn with_analysis(mut self, analysis: AnalysisSettings) -> Self {
        self.analysis = analysis;
        self
    }

    /// Build the production clients described by `config`.
    pub fn from_config(config: &RelayConfig) -> anyhow::Result<Self> {
        let cohere_key = config.credentials.cohere_api_key()?;
        let classifier = CohereClassifier::new(&config.classifier, cohere_key)
            .context("Failed to create classifier client")?;
        let gemini_key = config.credentials.gemini_api_key()?;
        let generator = GeminiGenerator::new(&config.generator, gemini_key)
            .context("Failed to create generator client")?;
        let repository = RepositoryFactory::from_settings(&config.store, &config.credentials)
            .context("Failed to create journal repository")?;

        Ok(Self {
            classifier: Arc::new(classifier),
            generator: Arc::new(generator),
            repository,
            analysis: config.analysis.clone(),
            body_limit: config.server.body_limit_bytes,
        })
    }
}
