//! Diagnostic model and rule engine.
//!
//! This module provides the pieces every format-specific validator is built
//! from:
//!
//! - **Rules** - Individual checks over a parsed model ([`LintRule`] trait)
//! - **Catalogs** - Ordered rule collections applied to a model ([`RuleCatalog`])
//! - **Diagnostics** - Findings with severity, category and suggestion ([`Diagnostic`])
//! - **Results** - Diagnostics split into errors and warnings with counts ([`ValidationResult`])
//!
//! # Example
//!
//! ```
//! use infralint::lint::{Category, Diagnostic, RuleId, Severity, ValidationResult};
//!
//! let mut result = ValidationResult::new();
//! result.push(Diagnostic::new(
//!     RuleId::new("env.empty_value"),
//!     Severity::Info,
//!     Category::BestPractice,
//!     "Variable 'DEBUG' has an empty value",
//! ));
//!
//! // Info findings never block validity
//! assert!(result.valid);
//! assert_eq!(result.summary.warning_count, 1);
//! assert!(Severity::Info < Severity::Error);
//! ```

pub mod catalog;
pub mod diagnostic;
pub mod output;
pub mod result;
pub mod rule;

pub use catalog::{RuleCatalog, RuleInfo};
pub use diagnostic::{Category, Diagnostic};
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat};
pub use result::{FileReport, Summary, ValidationResult, FILE_ACCESS_RULE};
pub use rule::{LintRule, RuleId, Severity};
