//! Shared test utilities for config module tests.

use std::sync::Mutex;

/// Mutex to serialize environment variable tests and prevent race conditions.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Set an environment variable for a test holding `ENV_MUTEX`.
pub fn set_env(name: &str, value: &str) {
    // SAFETY: callers hold ENV_MUTEX, so no other test thread touches the
    // environment concurrently.
    unsafe { std::env::set_var(name, value) };
}

/// Clean up environment variables used by the config loader.
pub fn cleanup_env_vars(vars: &[&str]) {
    for var in vars {
        // SAFETY: see `set_env`.
        unsafe { std::env::remove_var(var) };
    }
}
