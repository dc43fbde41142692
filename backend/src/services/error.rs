//! Error types for relay operations.
//!
//! Every relay failure is classified as either caller-caused or
//! upstream-caused so the HTTP layer can pick the status code without
//! inspecting messages.

use std::fmt;

use crate::db::repository::RepositoryError;
use crate::services::classifier::ClassifierError;
use crate::services::generator::GeneratorError;

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

/// External service a relay delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamService {
    Classifier,
    Generator,
    /// Journal store writes.
    Store,
    /// Journal store reads.
    StoreRead,
}

impl UpstreamService {
    /// Client-facing message for a failed call to this service.
    pub fn failure_message(&self) -> &'static str {
        match self {
            UpstreamService::Classifier => "Classification failed.",
            UpstreamService::Generator => "Reframe generation failed.",
            UpstreamService::Store => "Saving failed.",
            UpstreamService::StoreRead => "Loading journal logs failed.",
        }
    }
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpstreamService::Classifier => "classifier",
            UpstreamService::Generator => "generator",
            UpstreamService::Store | UpstreamService::StoreRead => "store",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Missing or empty required input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The classifier, generator or store call failed or timed out.
    #[error("{service} call failed: {message}")]
    Upstream {
        service: UpstreamService,
        message: String,
    },

    /// Model output could not be parsed into the required structure.
    #[error("Malformed model output: {message}")]
    MalformedOutput { message: String, raw_output: String },
}

impl RelayError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn upstream(service: UpstreamService, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Whether the caller, rather than an upstream service, caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<ClassifierError> for RelayError {
    fn from(err: ClassifierError) -> Self {
        RelayError::upstream(UpstreamService::Classifier, err.to_string())
    }
}

impl From<GeneratorError> for RelayError {
    fn from(err: GeneratorError) -> Self {
        RelayError::upstream(UpstreamService::Generator, err.to_string())
    }
}

/// Store failures are attributed to writes; reads map explicitly to
/// [`UpstreamService::StoreRead`].
impl From<RepositoryError> for RelayError {
    fn from(err: RepositoryError) -> Self {
        RelayError::upstream(UpstreamService::Store, err.to_string())
    }
}
