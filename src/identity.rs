//! Resolution of the user a CLI invocation acts for.

use std::env;

/// Environment variable naming the memory owner.
pub const USER_ENV_VAR: &str = "HOMELAB_MEMORY_USER";

/// User ID used when nothing else identifies the caller.
pub const DEFAULT_USER: &str = "default";

/// Resolve the user ID for this process.
///
/// Resolution priority (checked in order):
/// 1. Explicit override parameter (if provided and non-whitespace)
/// 2. `HOMELAB_MEMORY_USER` environment variable (if set and non-whitespace)
/// 3. `USER` environment variable (login name)
/// 4. `"default"`
///
/// Always returns a non-empty, trimmed string.
///
/// # Example
/// ```no_run
/// use homelab_memory::identity::resolve_user;
///
/// assert_eq!(resolve_user(Some("alice")), "alice");
/// println!("Acting for: {}", resolve_user(None));
/// ```
pub fn resolve_user(explicit: Option<&str>) -> String {
    let from_env = env::var(USER_ENV_VAR).ok();
    let login = env::var("USER").ok();
    pick_user(explicit, from_env.as_deref(), login.as_deref())
}

fn pick_user(explicit: Option<&str>, from_env: Option<&str>, login: Option<&str>) -> String {
    [explicit, from_env, login]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_USER)
        .to_string()
}
