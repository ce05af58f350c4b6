//! Built-in structured data rules.

use std::sync::Arc;

use serde_json::Value;

use crate::lint::{Category, Diagnostic, LintRule, RuleCatalog, RuleId, Severity};
use crate::secrets::SecretDetector;

use super::document::Document;

/// Reports a document that failed to parse.
pub struct SyntaxRule;

impl LintRule<Document> for SyntaxRule {
    fn id(&self) -> RuleId {
        RuleId::new("structured.syntax")
    }

    fn description(&self) -> &str {
        "Requires the file to parse as JSON or YAML"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn category(&self) -> Category {
        Category::Syntax
    }

    fn check(&self, document: &Document) -> Vec<Diagnostic> {
        let Document::Invalid(err) = document else {
            return Vec::new();
        };

        let diagnostic = self
            .diagnostic(format!("Invalid syntax: {}", err.message))
            .with_field("document")
            .with_suggestion("Fix the syntax error; no other checks ran");
        vec![match err.line {
            Some(line) => diagnostic.at_line(line),
            None => diagnostic,
        }]
    }
}

pub struct SecretValueRule {
    detector: Arc<SecretDetector>,
}

impl SecretValueRule {
    pub fn new(detector: Arc<SecretDetector>) -> Self {
        Self { detector }
    }
}

impl LintRule<Document> for SecretValueRule {
    fn id(&self) -> RuleId {
        RuleId::new("structured.secret_value")
    }

    fn description(&self) -> &str {
        "Flags string values that look like hardcoded secrets"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn category(&self) -> Category {
        Category::Security
    }

    fn check(&self, document: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (path, leaf) in document.leaves() {
            let Value::String(value) = leaf.value else {
                continue;
            };
            let key = leaf.key.unwrap_or_default();
            if self.detector.looks_like_secret(key, value) {
                diagnostics.push(
                    self.diagnostic(format!("'{}' looks like a hardcoded secret", path))
                        .with_field(path)
                        .with_value(value.as_str())
                        .with_suggestion("Load it from the environment or a secret store"),
                );
            }
        }
        diagnostics
    }
}

/// Build the structured data catalog.
pub fn catalog(detector: Arc<SecretDetector>) -> RuleCatalog<Document> {
    let mut catalog = RuleCatalog::new();
    catalog.register(Box::new(SyntaxRule));
    catalog.register(Box::new(SecretValueRule::new(detector)));
    catalog
}
