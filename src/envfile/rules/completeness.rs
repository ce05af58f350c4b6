//! Suggestions for commonly expected keys.

use crate::envfile::parser::EnvFile;
use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};

/// A commonly expected key.
pub struct CommonKey {
    /// Key suggested when none of `accepted` is present.
    pub suggested: &'static str,
    /// Keys that satisfy the expectation.
    pub accepted: &'static [&'static str],
    /// Key fragments showing the file configures this area.
    pub related: &'static [&'static str],
    pub purpose: &'static str,
}

pub const COMMON_KEYS: &[CommonKey] = &[
    CommonKey {
        suggested: "APP_ENV",
        accepted: &["APP_ENV", "NODE_ENV", "RAILS_ENV", "RACK_ENV", "FLASK_ENV", "ENVIRONMENT", "ENV"],
        related: &["APP_", "NODE_", "RAILS_", "DEBUG"],
        purpose: "environment mode",
    },
    CommonKey {
        suggested: "PORT",
        accepted: &["PORT", "APP_PORT", "HTTP_PORT", "SERVER_PORT"],
        related: &["APP_HOST", "SERVER", "LISTEN", "BIND", "HTTP"],
        purpose: "listening port",
    },
    CommonKey {
        suggested: "DATABASE_URL",
        accepted: &["DATABASE_URL", "DB_URL"],
        related: &["DB_", "DATABASE", "POSTGRES", "MYSQL", "MONGO"],
        purpose: "database connection",
    },
    CommonKey {
        suggested: "LOG_LEVEL",
        accepted: &["LOG_LEVEL", "LOGLEVEL", "RUST_LOG"],
        related: &["LOG", "DEBUG", "VERBOSE"],
        purpose: "log level",
    },
];

/// Suggests a missing common key once a related key shows up.
pub struct MissingCommonRule;

impl LintRule<EnvFile> for MissingCommonRule {
    fn id(&self) -> RuleId {
        RuleId::new("env.missing_common")
    }

    fn description(&self) -> &str {
        "Suggests environment mode, port, database URL and log level keys"
    }

    fn default_severity(&self) -> Severity {
        Severity::Info
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, env: &EnvFile) -> Vec<Diagnostic> {
        if env.is_empty() {
            return Vec::new();
        }

        let keys: Vec<String> = env.assignments().map(|a| a.key.to_uppercase()).collect();

        COMMON_KEYS
            .iter()
            .filter(|common| !common.accepted.iter().any(|k| keys.iter().any(|key| key == k)))
            .filter(|common| {
                common
                    .related
                    .iter()
                    .any(|fragment| keys.iter().any(|key| key.contains(fragment)))
            })
            .map(|common| {
                self.diagnostic(format!(
                    "No {} variable; consider adding {}",
                    common.purpose, common.suggested
                ))
                .with_field(common.suggested)
                .with_suggestion(format!("Add {}=...", common.suggested))
            })
            .collect()
    }
}
