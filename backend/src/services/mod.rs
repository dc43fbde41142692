//! Service layer: the relay operations and their external-service clients.
//!
//! Handlers call into [`relay`]; the relays talk to the classifier and
//! generator through the [`Classifier`] and [`Generator`] traits so tests can
//! substitute fakes.

pub mod classifier;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod reframes;
pub mod relay;
pub mod sentences;

pub use classifier::{Classifier, ClassifierError, CohereClassifier};
pub use dashboard::{load_dashboard, summarize_logs};
pub use error::{RelayError, RelayResult, UpstreamService};
pub use generator::{GeminiGenerator, Generator, GeneratorError};
pub use relay::{analyze_entry, generate_reframes, list_entries, save_entry, EntryAnalysis};

use std::time::Duration;

/// Build an outbound HTTP client, applying `timeout_secs` when configured.
pub(crate) fn build_http_client(timeout_secs: Option<u64>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}
