//! Dockerfile linting.
//!
//! - [`parser`] - Instruction parser with line continuation
//! - [`rules`] - The `dockerfile.*` rule catalog
//!
//! # Example
//!
//! ```
//! use infralint::dockerfile::DockerfileValidator;
//! use infralint::validator::Validator;
//!
//! let validator = DockerfileValidator::new();
//! let result = validator.validate_content("FROM node\nCMD [\"x\"]");
//!
//! assert!(result.valid);
//! assert!(result.has_rule("dockerfile.from_latest_tag"));
//! assert!(result.has_rule("dockerfile.user_missing"));
//! ```

pub mod parser;
pub mod rules;

use std::sync::Arc;

use tracing::debug;

pub use parser::{Dockerfile, Instruction};

use crate::lint::{RuleCatalog, RuleInfo, ValidationResult};
use crate::secrets::SecretDetector;
use crate::shell::ShellHeuristics;
use crate::validator::{FileKind, Validator};

/// Validates Dockerfiles against the built-in catalog.
pub struct DockerfileValidator {
    catalog: RuleCatalog<Dockerfile>,
}

impl DockerfileValidator {
    /// Create a validator with every built-in rule.
    pub fn new() -> Self {
        Self::with_shared(
            Arc::new(ShellHeuristics::with_builtins()),
            Arc::new(SecretDetector::with_builtins()),
        )
    }

    /// Create a validator whose rules share the given pattern tables.
    pub fn with_shared(shell: Arc<ShellHeuristics>, detector: Arc<SecretDetector>) -> Self {
        Self {
            catalog: rules::catalog(shell, detector),
        }
    }

    /// The rule catalog.
    pub fn catalog(&self) -> &RuleCatalog<Dockerfile> {
        &self.catalog
    }
}

impl Default for DockerfileValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for DockerfileValidator {
    fn kind(&self) -> FileKind {
        FileKind::Dockerfile
    }

    fn validate_content(&self, content: &str) -> ValidationResult {
        let dockerfile = Dockerfile::parse(content);
        debug!(instructions = dockerfile.instructions.len(), "parsed Dockerfile");

        let mut result = ValidationResult::new();
        self.catalog.apply(&dockerfile, &mut result);
        result.tally(dockerfile.instructions.iter().map(|i| Some(i.line)));
        result
    }

    fn rules(&self) -> Vec<RuleInfo> {
        self.catalog.describe()
    }

    fn disable_rules(&mut self, ids: &[String]) {
        self.catalog.disable(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::Severity;

    #[test]
    fn empty_file_only_reports_missing_from() {
        let result = DockerfileValidator::new().validate_content("");

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.warnings.is_empty());
        assert_eq!(result.summary.missing_required, 1);
        assert_eq!(result.summary.total_properties, 0);
    }

    #[test]
    fn clean_dockerfile_has_no_findings() {
        let content = "\
FROM node:20-alpine
WORKDIR /app
COPY package.json package-lock.json ./
RUN npm ci --omit=dev
COPY src/ ./src/
USER node
HEALTHCHECK CMD wget -qO- http://localhost:3000/health || exit 1
EXPOSE 3000
CMD [\"node\", \"src/index.js\"]
";
        let result = DockerfileValidator::new().validate_content(content);

        assert!(result.valid);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.summary.total_properties, 9);
        assert_eq!(result.summary.valid_properties, 9);
    }

    #[test]
    fn invalid_port_invalidates_its_line() {
        let result = DockerfileValidator::new().validate_content("FROM alpine:3\nEXPOSE 99999\nUSER app");

        assert!(!result.valid);
        assert_eq!(result.with_severity(Severity::Error).count(), 1);
        assert_eq!(result.summary.total_properties, 3);
        assert_eq!(result.summary.valid_properties, 2);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut validator = DockerfileValidator::new();
        validator.disable_rules(&["dockerfile.from_required".to_string()]);

        assert!(validator.validate_content("").valid);
        assert_eq!(validator.rules().len(), 21);
    }
}
