//! Configuration schema types.
//!
//! This module defines the structure of `.infralint.yml`. Every key is
//! optional; a missing key takes its default.

use serde::{Deserialize, Serialize};

use crate::fs::DEFAULT_MAX_FILE_SIZE;
use crate::lint::Severity;

/// Which findings make a lint run fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailLevel {
    /// Only Errors fail the run.
    #[default]
    Error,
    /// Warnings fail the run too. Info never does.
    Warning,
}

impl FailLevel {
    /// Lowest severity that fails a run at this level.
    pub fn threshold(&self) -> Severity {
        match self {
            FailLevel::Error => Severity::Error,
            FailLevel::Warning => Severity::Warning,
        }
    }
}

/// Settings from `.infralint.yml`.
///
/// # Example
///
/// ```
/// use infralint::config::{FailLevel, LintConfig};
///
/// let config: LintConfig = serde_yaml::from_str("disabled_rules: [env.key_case]\nfail_on: warning").unwrap();
///
/// assert_eq!(config.disabled_rules, vec!["env.key_case"]);
/// assert_eq!(config.fail_on, FailLevel::Warning);
/// assert!(config.restrict_to_project);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Rule ids removed from every catalog.
    pub disabled_rules: Vec<String>,

    pub fail_on: FailLevel,

    /// Files larger than this many bytes become a read error.
    pub max_file_size: u64,

    /// Refuse to read files outside the project root.
    pub restrict_to_project: bool,

    /// Directory names skipped when discovering files.
    pub exclude: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            fail_on: FailLevel::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            restrict_to_project: true,
            exclude: vec![
                "node_modules".to_string(),
                "target".to_string(),
                ".git".to_string(),
            ],
        }
    }
}
