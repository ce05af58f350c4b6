//! Ordered rule catalogs.
//!
//! A [`RuleCatalog`] holds the rules for one parsed model in a fixed
//! order and applies them to a [`ValidationResult`]. Registration order is
//! output order: structural rules first, then per-item rules, then
//! cross-cutting rules.

use serde::Serialize;

use super::diagnostic::Category;
use super::result::ValidationResult;
use super::rule::{LintRule, RuleId, Severity};

/// Static description of a catalog rule, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub id: RuleId,
    pub severity: Severity,
    pub category: Category,
    pub description: String,
}

/// Ordered collection of lint rules over model `M`.
pub struct RuleCatalog<M> {
    rules: Vec<Box<dyn LintRule<M>>>,
}

impl<M> RuleCatalog<M> {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a lint rule at the end of the catalog.
    ///
    /// A rule whose id is already registered replaces the earlier one in place.
    pub fn register(&mut self, rule: Box<dyn LintRule<M>>) {
        let id = rule.id();
        match self.rules.iter().position(|r| r.id() == id) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Remove every rule whose id is listed.
    pub fn disable<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.rules
            .retain(|rule| !ids.iter().any(|id| rule.id().as_str() == id.as_ref()));
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn LintRule<M>> {
        self.rules.iter().find(|r| &r.id() == id).map(|r| r.as_ref())
    }

    /// Iterate over the rules in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LintRule<M>> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Describe every rule in catalog order.
    pub fn describe(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|rule| RuleInfo {
                id: rule.id(),
                severity: rule.default_severity(),
                category: rule.category(),
                description: rule.description().to_string(),
            })
            .collect()
    }

    /// Run every rule against `model`, appending to `result` in catalog order.
    pub fn apply(&self, model: &M, result: &mut ValidationResult) {
        for rule in &self.rules {
            let diagnostics = rule.check(model);
            tracing::debug!(rule = %rule.id(), found = diagnostics.len(), "rule checked");
            for diagnostic in diagnostics {
                if rule.reports_missing_required() {
                    result.push_missing_required(diagnostic);
                } else {
                    result.push(diagnostic);
                }
            }
        }
    }
}

impl<M> Default for RuleCatalog<M> {
    fn default() -> Self {
        Self::new()
    }
}
