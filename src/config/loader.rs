//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::EmbeddingProvider;
use crate::errors::Error;

/// Configuration loaded from TOML file. Absent keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub database_path: Option<PathBuf>,
    pub embedding_provider: Option<EmbeddingProvider>,
    pub embedding_model: Option<String>,
    pub model_cache: Option<PathBuf>,
    pub gemini_model: Option<String>,
    pub gemini_dimensions: Option<usize>,
    pub google_api_key: Option<String>,
    pub embedding_timeout_secs: Option<u64>,
    pub min_similarity: Option<f64>,
    pub recall_limit: Option<usize>,
    pub recall_scan_limit: Option<usize>,
    pub log_file: Option<PathBuf>,
}

/// `~/.config/homelab-memory/config.toml` (platform config dir).
pub fn default_config_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let config_dir = dirs::config_dir().unwrap_or_else(|| home.join(".config"));
    config_dir.join("homelab-memory/config.toml")
}

/// Load configuration from a TOML file, or `None` if it does not exist.
pub fn load_from_file(config_path: &Path) -> Result<Option<ConfigFile>, Error> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}
