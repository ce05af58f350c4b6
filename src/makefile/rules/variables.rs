//! Variable assignment rules.

use std::sync::Arc;

use crate::lint::{Category, Diagnostic, LintRule, RuleId, Severity};
use crate::makefile::parser::{AssignOp, Makefile, Variable};
use crate::secrets::{strip_quotes, SecretDetector};

/// Machine-specific path prefixes.
pub const HARDCODED_PATH_PREFIXES: &[&str] = &[
    "/usr/local/",
    "/home/",
    "/Users/",
    "/opt/",
    "/tmp/",
    "/var/",
    "/etc/",
    "C:\\",
];

fn at_variable<R: LintRule<Makefile>>(rule: &R, variable: &Variable, message: String) -> Diagnostic {
    rule.diagnostic(message)
        .with_field(&variable.name)
        .with_value(&variable.value)
        .at_line(variable.line)
}

pub struct VariableNamingRule;

impl LintRule<Makefile> for VariableNamingRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.variable_naming")
    }

    fn description(&self) -> &str {
        "Requires upper-case variable names"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Style
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .variables
            .iter()
            .filter(|v| !v.name.starts_with('.') && !v.name.contains('$'))
            .filter(|v| v.name.chars().any(char::is_lowercase))
            .map(|v| {
                at_variable(self, v, format!("Variable '{}' is not upper-case", v.name))
                    .with_suggestion(format!("Rename it to '{}'", v.name.to_uppercase()))
            })
            .collect()
    }
}

pub struct HardcodedPathRule;

impl LintRule<Makefile> for HardcodedPathRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.hardcoded_path")
    }

    fn description(&self) -> &str {
        "Flags machine-specific absolute paths in variable values"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::BestPractice
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for variable in &makefile.variables {
            let hit = variable.value.split_whitespace().find_map(|token| {
                let token = strip_quotes(token);
                HARDCODED_PATH_PREFIXES
                    .iter()
                    .any(|prefix| token.starts_with(prefix))
                    .then_some(token)
            });
            if let Some(path) = hit {
                diagnostics.push(
                    at_variable(
                        self,
                        variable,
                        format!("Variable '{}' hardcodes the path '{}'", variable.name, path),
                    )
                    .with_suggestion("Derive it from $(CURDIR), $(HOME) or a ?= default"),
                );
            }
        }
        diagnostics
    }
}

/// A recursive (`=`) variable that mentions itself never finishes expanding.
pub struct RecursiveSelfReferenceRule;

impl LintRule<Makefile> for RecursiveSelfReferenceRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.recursive_self_reference")
    }

    fn description(&self) -> &str {
        "Flags '=' assignments that reference themselves"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .variables
            .iter()
            .filter(|v| v.operator == AssignOp::Recursive)
            .filter(|v| {
                v.value.contains(&format!("$({})", v.name))
                    || v.value.contains(&format!("${{{}}}", v.name))
            })
            .map(|v| {
                at_variable(self, v, format!("Variable '{}' references itself", v.name))
                    .with_suggestion(format!("Use '{} +=' or ':=' instead", v.name))
            })
            .collect()
    }
}

pub struct VariableSecretRule {
    detector: Arc<SecretDetector>,
}

impl VariableSecretRule {
    pub fn new(detector: Arc<SecretDetector>) -> Self {
        Self { detector }
    }
}

impl LintRule<Makefile> for VariableSecretRule {
    fn id(&self) -> RuleId {
        RuleId::new("makefile.variable_secret")
    }

    fn description(&self) -> &str {
        "Flags variable values that look like hardcoded secrets"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, makefile: &Makefile) -> Vec<Diagnostic> {
        makefile
            .variables
            .iter()
            .filter(|v| self.detector.looks_like_secret(&v.name, strip_quotes(&v.value)))
            .map(|v| {
                at_variable(self, v, format!("Variable '{}' looks like a hardcoded secret", v.name))
                    .with_suggestion("Read it from the environment instead, e.g. NAME ?= $(shell cat ...)")
            })
            .collect()
    }
}
