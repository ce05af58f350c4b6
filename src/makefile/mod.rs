//! Makefile linting.
//!
//! - [`parser`] - Target, recipe and variable classifier
//! - [`rules`] - The `makefile.*` rule catalog
//!
//! Recipe lines indented with spaces are still recorded as recipe lines,
//! so command checks see the same text whether the line uses a tab or not;
//! only `makefile.tab_indentation` tells them apart.

pub mod parser;
pub mod rules;

use std::sync::Arc;

use tracing::debug;

pub use parser::{AssignOp, Makefile, RecipeLine, Target, Variable};

use crate::lint::{RuleCatalog, RuleInfo, ValidationResult};
use crate::secrets::SecretDetector;
use crate::shell::ShellHeuristics;
use crate::validator::{FileKind, Validator};

/// Validates Makefiles against the built-in catalog.
pub struct MakefileValidator {
    catalog: RuleCatalog<Makefile>,
}

impl MakefileValidator {
    pub fn new() -> Self {
        Self::with_shared(
            Arc::new(ShellHeuristics::with_builtins()),
            Arc::new(SecretDetector::with_builtins()),
        )
    }

    pub fn with_shared(shell: Arc<ShellHeuristics>, detector: Arc<SecretDetector>) -> Self {
        Self {
            catalog: rules::catalog(shell, detector),
        }
    }

    pub fn catalog(&self) -> &RuleCatalog<Makefile> {
        &self.catalog
    }
}

impl Default for MakefileValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for MakefileValidator {
    fn kind(&self) -> FileKind {
        FileKind::Makefile
    }

    fn validate_content(&self, content: &str) -> ValidationResult {
        let makefile = Makefile::parse(content);
        debug!(
            targets = makefile.targets.len(),
            variables = makefile.variables.len(),
            "parsed Makefile"
        );

        let mut result = ValidationResult::new();
        self.catalog.apply(&makefile, &mut result);

        // A target is invalid if its header or any recipe line has an Error.
        let error_lines: Vec<Option<usize>> = result.errors.iter().map(|d| d.line).collect();
        let items = makefile
            .targets
            .iter()
            .map(|t| {
                t.recipe_lines
                    .iter()
                    .find(|r| error_lines.contains(&Some(r.line)))
                    .map_or(t.line, |r| r.line)
            })
            .chain(makefile.variables.iter().map(|v| v.line))
            .map(Some)
            .collect::<Vec<_>>();
        result.tally(items);
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
    fn empty_makefile_is_clean() {
        let result = MakefileValidator::new().validate_content("");

        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn space_indented_recipe_is_the_only_error() {
        let result = MakefileValidator::new().validate_content("build:\n    echo hi");

        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule_id.as_str(), "makefile.tab_indentation");
        assert_eq!(result.summary.total_properties, 1);
        assert_eq!(result.summary.valid_properties, 0);
    }

    #[test]
    fn tidy_makefile_has_no_warnings() {
        let content = "\
.PHONY: all build clean help

BIN := app

all: build

build:
\tgo build -o $(BIN) ./cmd

clean:
\trm -rf $(BIN)

help:
\t@echo \"make build\"
";
        let result = MakefileValidator::new().validate_content(content);

        assert!(result.valid);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.summary.total_properties, 5);
        assert_eq!(result.summary.valid_properties, 5);
    }

    #[test]
    fn command_findings_ignore_indentation() {
        let validator = MakefileValidator::new();
        let tabbed = validator.validate_content("nuke:\n\trm -rf /\n");
        let spaced = validator.validate_content("nuke:\n    rm -rf /\n");

        let commands = |result: &ValidationResult| {
            result
                .diagnostics()
                .filter(|d| d.rule_id.as_str() == "makefile.dangerous_command")
                .cloned()
                .collect::<Vec<_>>()
        };
        assert_eq!(commands(&tabbed), commands(&spaced));
        assert_eq!(spaced.with_severity(Severity::Error).count(), 1);
    }
}
