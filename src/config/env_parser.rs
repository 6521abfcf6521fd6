//! Environment variable parsing utilities for configuration.

use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use crate::errors::Error;

pub const DATABASE_PATH: &str = "HOMELAB_MEMORY_DATABASE_PATH";
pub const EMBEDDING_PROVIDER: &str = "HOMELAB_MEMORY_EMBEDDING_PROVIDER";
pub const EMBEDDING_MODEL: &str = "HOMELAB_MEMORY_EMBEDDING_MODEL";
pub const MODEL_CACHE: &str = "HOMELAB_MEMORY_MODEL_CACHE";
pub const GEMINI_MODEL: &str = "HOMELAB_MEMORY_GEMINI_MODEL";
pub const GEMINI_DIMENSIONS: &str = "HOMELAB_MEMORY_GEMINI_DIMENSIONS";
pub const EMBEDDING_TIMEOUT_SECS: &str = "HOMELAB_MEMORY_EMBEDDING_TIMEOUT_SECS";
pub const MIN_SIMILARITY: &str = "HOMELAB_MEMORY_MIN_SIMILARITY";
pub const RECALL_LIMIT: &str = "HOMELAB_MEMORY_RECALL_LIMIT";
pub const RECALL_SCAN_LIMIT: &str = "HOMELAB_MEMORY_RECALL_SCAN_LIMIT";
pub const LOG_FILE: &str = "HOMELAB_MEMORY_LOG_FILE";
/// Shared with other Google tooling, hence no prefix.
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

/// Every environment variable that overrides configuration.
pub const ENV_VARS: &[&str] = &[
    DATABASE_PATH,
    EMBEDDING_PROVIDER,
    EMBEDDING_MODEL,
    MODEL_CACHE,
    GEMINI_MODEL,
    GEMINI_DIMENSIONS,
    EMBEDDING_TIMEOUT_SECS,
    MIN_SIMILARITY,
    RECALL_LIMIT,
    RECALL_SCAN_LIMIT,
    LOG_FILE,
    GOOGLE_API_KEY,
];

/// Parse environment variable value or return error if empty/whitespace.
fn parse_env_string(name: &str, value: &str) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(value.to_string())
}

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value)))
}

/// Parse environment variable with `FromStr`; range checks happen in validation.
fn parse_env_value<T>(name: &str, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Overwrite `target` with the string in `name`, if set.
pub fn apply_string_override(name: &str, target: &mut String) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *target = parse_env_string(name, &val)?;
    }
    Ok(())
}

/// Overwrite `target` with the path in `name`, if set.
pub fn apply_path_override(name: &str, target: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *target = parse_env_path(name, &val)?;
    }
    Ok(())
}

/// Overwrite `target` with the parsed value of `name`, if set.
pub fn apply_value_override<T>(name: &str, target: &mut T) -> Result<(), Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(val) = std::env::var(name) {
        *target = parse_env_value(name, &val)?;
    }
    Ok(())
}

/// Set an optional string from `name`, if set.
pub fn apply_optional_string_override(
    name: &str,
    target: &mut Option<String>,
) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *target = Some(parse_env_string(name, &val)?);
    }
    Ok(())
}

/// Set an optional path from `name`, if set.
pub fn apply_optional_path_override(
    name: &str,
    target: &mut Option<PathBuf>,
) -> Result<(), Error> {
    if let Ok(val) = std::env::var(name) {
        *target = Some(parse_env_path(name, &val)?);
    }
    Ok(())
}
