//! Discovery of the `crm.yaml` configuration file.
//!
//! The file is looked up by walking from a start directory towards the
//! filesystem root. The `CRM_CONFIG` environment variable takes precedence.

use std::path::{Path, PathBuf};

/// The name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "crm.yaml";

/// Environment variable that names the configuration file explicitly.
const CONFIG_ENV: &str = "CRM_CONFIG";

/// Walk up the directory tree from `start` looking for `crm.yaml`.
///
/// Returns `None` if the filesystem root is reached without finding one.
/// The `CRM_CONFIG` environment variable is checked first.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        let env_path = PathBuf::from(env_path);
        if env_path.is_file() {
            return Some(env_path);
        }
    }
    find_config_file_from(start)
}

/// Like [`find_config_file`], ignoring the environment.
pub fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;

    let mut current = start.as_path();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => return None,
        }
    }
}
