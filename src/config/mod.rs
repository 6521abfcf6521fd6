//! Configuration system for homelab-memory.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::embedding::{DEFAULT_GEMINI_DIMENSIONS, DEFAULT_GEMINI_MODEL, DEFAULT_LOCAL_MODEL};
use crate::errors::Error;
use crate::memory::store::{DEFAULT_MIN_SIMILARITY, DEFAULT_RECALL_LIMIT, DEFAULT_SCAN_LIMIT};

pub use env_parser::ENV_VARS;
pub use loader::{ConfigFile, default_config_path};

/// Which embedder backs the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    /// Local ONNX model, no network after the first download.
    #[default]
    Local,
    /// Gemini embedding API.
    Gemini,
}

impl FromStr for EmbeddingProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(EmbeddingProvider::Local),
            "gemini" => Ok(EmbeddingProvider::Gemini),
            other => Err(Error::Config(format!(
                "Unknown embedding provider '{other}' (expected 'local' or 'gemini')"
            ))),
        }
    }
}

impl fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingProvider::Local => write!(f, "local"),
            EmbeddingProvider::Gemini => write!(f, "gemini"),
        }
    }
}

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Clone)]
pub struct Config {
    /// Path to the SQLite database.
    pub database_path: PathBuf,

    /// Embedding backend.
    pub embedding_provider: EmbeddingProvider,

    /// HuggingFace model identifier for the local provider.
    pub embedding_model: String,

    /// Directory for caching ONNX models.
    pub model_cache: PathBuf,

    /// Gemini model name for the remote provider.
    pub gemini_model: String,

    /// Output dimensionality requested from Gemini.
    pub gemini_dimensions: usize,

    /// API key for Gemini.
    pub google_api_key: Option<String>,

    /// Timeout for one remote embedding request.
    pub embedding_timeout_secs: u64,

    /// Default minimum cosine similarity for recall.
    pub min_similarity: f64,

    /// Default number of recall results.
    pub recall_limit: usize,

    /// Most candidates scored by one semantic recall.
    pub recall_scan_limit: usize,

    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("embedding_provider", &self.embedding_provider)
            .field("embedding_model", &self.embedding_model)
            .field("model_cache", &self.model_cache)
            .field("gemini_model", &self.gemini_model)
            .field("gemini_dimensions", &self.gemini_dimensions)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("embedding_timeout_secs", &self.embedding_timeout_secs)
            .field("min_similarity", &self.min_similarity)
            .field("recall_limit", &self.recall_limit)
            .field("recall_scan_limit", &self.recall_scan_limit)
            .field("log_file", &self.log_file)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });
        let data_dir = home.join(".homelab-memory");

        Self {
            database_path: data_dir.join("memories.db"),
            embedding_provider: EmbeddingProvider::Local,
            embedding_model: DEFAULT_LOCAL_MODEL.to_string(),
            model_cache: data_dir.join("models"),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_dimensions: DEFAULT_GEMINI_DIMENSIONS,
            google_api_key: None,
            embedding_timeout_secs: 30,
            min_similarity: DEFAULT_MIN_SIMILARITY,
            recall_limit: DEFAULT_RECALL_LIMIT,
            recall_scan_limit: DEFAULT_SCAN_LIMIT,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default file location plus environment.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(None)
    }

    /// Load configuration with defaults, file values, and environment overrides.
    ///
    /// `path` replaces the default config file location. An explicit path
    /// must exist; the default location is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, Error> {
        let file_config = match path {
            Some(explicit) => Some(loader::load_from_file(explicit)?.ok_or_else(|| {
                Error::Config(format!("Config file not found: {}", explicit.display()))
            })?),
            None => loader::load_from_file(&default_config_path())?,
        };

        let mut config = Config::default();

        if let Some(file) = file_config {
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(&mut config)?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if let Some(mut path) = file.database_path {
            paths::expand_tilde(&mut path);
            self.database_path = path;
        }
        if let Some(provider) = file.embedding_provider {
            self.embedding_provider = provider;
        }
        if let Some(model) = file.embedding_model {
            self.embedding_model = model;
        }
        if let Some(mut path) = file.model_cache {
            paths::expand_tilde(&mut path);
            self.model_cache = path;
        }
        if let Some(model) = file.gemini_model {
            self.gemini_model = model;
        }
        if let Some(dimensions) = file.gemini_dimensions {
            self.gemini_dimensions = dimensions;
        }
        if file.google_api_key.is_some() {
            self.google_api_key = file.google_api_key;
        }
        if let Some(secs) = file.embedding_timeout_secs {
            self.embedding_timeout_secs = secs;
        }
        if let Some(min_similarity) = file.min_similarity {
            self.min_similarity = min_similarity;
        }
        if let Some(limit) = file.recall_limit {
            self.recall_limit = limit;
        }
        if let Some(limit) = file.recall_scan_limit {
            self.recall_scan_limit = limit;
        }
        if let Some(mut path) = file.log_file {
            paths::expand_tilde(&mut path);
            self.log_file = Some(path);
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        validation::ConfigValidator::new(self).validate()
    }

    /// Ensure parent directories for database, cache and log paths exist.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        if self.embedding_provider == EmbeddingProvider::Local
            && !self.model_cache.as_os_str().is_empty()
        {
            std::fs::create_dir_all(&self.model_cache).map_err(|e| {
                Error::Config(format!(
                    "Failed to create model cache directory {}: {e}",
                    self.model_cache.display()
                ))
            })?;
        }

        if let Some(parent) = self.log_file.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(())
    }
}
