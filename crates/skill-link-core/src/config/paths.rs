//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// File name looked up at the repository root.
pub const REPO_CONFIG_FILE: &str = "skill-link.toml";

/// User-level config: `<config_dir>/skill-link/config.toml`.
pub fn global_config_path(global_dir: &Path) -> PathBuf {
    global_dir.join("config.toml")
}

pub fn repo_config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(REPO_CONFIG_FILE)
}

/// Expand a configured directory: `~/` is the home directory, relative
/// paths are anchored at the repository root.
pub fn expand_dir(raw: &str, home_dir: &Path, repo_root: &Path) -> PathBuf {
    if raw == "~" {
        home_dir.to_path_buf()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home_dir.join(rest)
    } else {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            repo_root.join(raw.strip_prefix("./").unwrap_or(raw))
        }
    }
}
