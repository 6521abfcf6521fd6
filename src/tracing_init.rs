//! Tracing initialization for the CLI.
//!
//! Logs go to stderr, or are appended to the configured log file so that
//! several invocations can share one log.

use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "HOMELAB_MEMORY_LOG";

/// Build the filter: `HOMELAB_MEMORY_LOG` if set and valid, else `info` when
/// verbose and `warn` otherwise.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "info" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_tracing(log_file: Option<&Path>, verbose: bool) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(true);

    match log_file {
        Some(path) => {
            // Append mode: concurrent invocations share one file.
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let _ = builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
    Ok(())
}
