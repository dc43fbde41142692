//! Relay configuration.
//!
//! Settings are read from an optional `relay.toml` file and then overridden by
//! environment variables. API keys are only ever taken from the environment.
//!
//! # Environment Variables
//! - `RELAY_CONFIG` (optional): explicit path to the TOML file
//! - `HOST`, `PORT` (optional): bind address (default `0.0.0.0:5003`)
//! - `COHERE_API_KEY` (required at startup): classifier credentials
//! - `COHERE_MODEL` (optional): classifier model identifier
//! - `GEMINI_API_KEY` (required at startup): generator credentials
//! - `GEMINI_MODEL` (optional): generator model name
//! - `REPOSITORY_TYPE` (optional): `supabase` (default) | `local`
//! - `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`: store endpoint and key

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_CLASSIFIER_MODEL: &str = "5d634318-a112-48f9-b899-3cf5ef2140db-ft";
pub const DEFAULT_GENERATOR_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_JOURNAL_TABLE: &str = "journal_logs";

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{name} must be {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
}

/// Complete relay configuration. Immutable once the server starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub server: ServerSettings,
    pub analysis: AnalysisSettings,
    pub classifier: ClassifierSettings,
    pub generator: GeneratorSettings,
    pub store: StoreSettings,
    #[serde(skip)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5003,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "server address",
            expected: "a valid host:port",
            value: raw,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Classifications below this confidence are left out of the suggested
    /// distortion map.
    pub min_confidence: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_confidence: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub base_url: String,
    pub model: String,
    /// Request timeout; `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.cohere.ai".to_string(),
            model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: DEFAULT_GENERATOR_MODEL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// `supabase` or `local`. When unset, Supabase is used and a URL is required.
    #[serde(rename = "type")]
    pub repo_type: Option<String>,
    pub url: Option<String>,
    pub table: String,
    pub timeout_secs: Option<u64>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            repo_type: None,
            url: None,
            table: DEFAULT_JOURNAL_TABLE.to_string(),
            timeout_secs: None,
        }
    }
}

/// API keys for the external services.
#[derive(Clone, Default)]
pub struct Credentials {
    pub cohere_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub supabase_service_key: Option<String>,
}

impl Credentials {
    pub fn cohere_api_key(&self) -> Result<&str, ConfigError> {
        self.cohere_api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar("COHERE_API_KEY"))
    }

    pub fn gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini_api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))
    }

    pub fn supabase_service_key(&self) -> Result<&str, ConfigError> {
        self.supabase_service_key
            .as_deref()
            .ok_or(ConfigError::MissingVar("SUPABASE_SERVICE_ROLE_KEY"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mask(key: &Option<String>) -> &'static str {
            if key.is_some() {
                "<set>"
            } else {
                "<unset>"
            }
        }
        f.debug_struct("Credentials")
            .field("cohere_api_key", &mask(&self.cohere_api_key))
            .field("gemini_api_key", &mask(&self.gemini_api_key))
            .field("supabase_service_key", &mask(&self.supabase_service_key))
            .finish()
    }
}

impl RelayConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Locate the configuration file.
    ///
    /// Uses `RELAY_CONFIG` when set, otherwise searches for `relay.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_config_file() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var("RELAY_CONFIG") {
            return Some(PathBuf::from(explicit));
        }

        [
            PathBuf::from("relay.toml"),
            PathBuf::from("backend/relay.toml"),
            PathBuf::from("../relay.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load the file (if any), apply environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment-style lookups.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                expected: "a valid port number",
                value: port,
            })?;
        }
        if let Some(model) = var("COHERE_MODEL") {
            self.classifier.model = model;
        }
        if let Some(model) = var("GEMINI_MODEL") {
            self.generator.model = model;
        }
        if let Some(repo_type) = var("REPOSITORY_TYPE") {
            self.store.repo_type = Some(repo_type);
        }
        if let Some(url) = var("SUPABASE_URL") {
            self.store.url = Some(url);
        }

        if let Some(key) = var("COHERE_API_KEY") {
            self.credentials.cohere_api_key = Some(key);
        }
        if let Some(key) = var("GEMINI_API_KEY") {
            self.credentials.gemini_api_key = Some(key);
        }
        if let Some(key) = var("SUPABASE_SERVICE_ROLE_KEY") {
            self.credentials.supabase_service_key = Some(key);
        }

        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.analysis.min_confidence;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                name: "analysis.min_confidence",
                expected: "between 0 and 1",
                value: threshold.to_string(),
            });
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "server.body_limit_bytes",
                expected: "greater than zero",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}
