//! Configuration validation logic.

use super::{Config, EmbeddingProvider};
use crate::errors::Error;
use crate::sqlite::search::MAX_SEARCH_LIMIT;

/// Validates configuration values.
pub struct ConfigValidator<'a> {
    config: &'a Config,
}

impl<'a> ConfigValidator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Minimum similarity is finite and within -1.0..=1.0
    /// - Recall limit is within 1..=10000 and the scan limit is positive
    /// - The active provider has a model name (the Gemini API key is checked
    ///   when the embedder is built, so key-less configs can still read)
    /// - Database path is not empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_min_similarity()?;
        self.validate_limits()?;
        self.validate_provider()?;
        self.validate_database_path()?;

        Ok(())
    }

    fn validate_min_similarity(&self) -> Result<(), Error> {
        let value = self.config.min_similarity;
        if !value.is_finite() {
            return Err(Error::Config(
                "Invalid min_similarity: NaN and infinity are not allowed".into(),
            ));
        }

        if !(-1.0..=1.0).contains(&value) {
            return Err(Error::Config(format!(
                "Invalid min_similarity: {value} (must be between -1.0 and 1.0)"
            )));
        }

        Ok(())
    }

    fn validate_limits(&self) -> Result<(), Error> {
        let limit = self.config.recall_limit;
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(Error::Config(format!(
                "Invalid recall_limit: {limit} (must be between 1 and {MAX_SEARCH_LIMIT})"
            )));
        }

        if self.config.recall_scan_limit == 0 {
            return Err(Error::Config(
                "Invalid recall_scan_limit: must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_provider(&self) -> Result<(), Error> {
        if self.config.embedding_timeout_secs == 0 {
            return Err(Error::Config(
                "Invalid embedding_timeout_secs: must be at least 1".to_string(),
            ));
        }

        match self.config.embedding_provider {
            EmbeddingProvider::Local => {
                if self.config.embedding_model.trim().is_empty() {
                    return Err(Error::Config("Embedding model cannot be empty".to_string()));
                }
            }
            EmbeddingProvider::Gemini => {
                if self.config.gemini_model.trim().is_empty() {
                    return Err(Error::Config("Gemini model cannot be empty".to_string()));
                }
                if self.config.gemini_dimensions == 0 {
                    return Err(Error::Config(
                        "Invalid gemini_dimensions: must be at least 1".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    fn validate_database_path(&self) -> Result<(), Error> {
        if self.config.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        Ok(())
    }
}
