//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::LintConfig;
use crate::error::{LintError, Result};

/// File names looked up at the project root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".infralint.yml", ".infralint.yaml"];

/// Find the project config file, if there is one.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<LintConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LintError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LintError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`LintConfig`].
///
/// An empty file yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<LintConfig> {
    if content.trim().is_empty() {
        return Ok(LintConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| LintError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the project config is used
/// when present and the defaults otherwise.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<LintConfig> {
    let path = match config_override {
        Some(path) => path.to_path_buf(),
        None => match find_config_file(project_root) {
            Some(path) => path,
            None => {
                debug!(root = %project_root.display(), "no config file, using defaults");
                return Ok(LintConfig::default());
            }
        },
    };

    debug!(path = %path.display(), "loading config");
    load_config_file(&path)
}
