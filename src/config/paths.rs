//! Tilde (`~`) expansion for configured paths.

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the home directory, in place.
pub fn expand_tilde(path: &mut PathBuf) {
    let expanded = expand_tilde_path(path);
    *path = expanded;
}

/// Expand a leading `~` to the home directory.
///
/// Paths without a leading `~`, and every path on systems without a home
/// directory, come back unchanged.
pub fn expand_tilde_path(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
