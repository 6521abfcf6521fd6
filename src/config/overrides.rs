//! Environment variable overrides for configuration.

use super::Config;
use super::env_parser::{self, *};
use crate::errors::Error;

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Error> {
    env_parser::apply_path_override(DATABASE_PATH, &mut config.database_path)?;
    env_parser::apply_value_override(EMBEDDING_PROVIDER, &mut config.embedding_provider)?;
    env_parser::apply_string_override(EMBEDDING_MODEL, &mut config.embedding_model)?;
    env_parser::apply_path_override(MODEL_CACHE, &mut config.model_cache)?;
    env_parser::apply_string_override(GEMINI_MODEL, &mut config.gemini_model)?;
    env_parser::apply_value_override(GEMINI_DIMENSIONS, &mut config.gemini_dimensions)?;
    env_parser::apply_value_override(
        EMBEDDING_TIMEOUT_SECS,
        &mut config.embedding_timeout_secs,
    )?;
    env_parser::apply_value_override(MIN_SIMILARITY, &mut config.min_similarity)?;
    env_parser::apply_value_override(RECALL_LIMIT, &mut config.recall_limit)?;
    env_parser::apply_value_override(RECALL_SCAN_LIMIT, &mut config.recall_scan_limit)?;
    env_parser::apply_optional_path_override(LOG_FILE, &mut config.log_file)?;
    env_parser::apply_optional_string_override(GOOGLE_API_KEY, &mut config.google_api_key)?;
    Ok(())
}
