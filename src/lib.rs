//! infralint - Static analysis for infrastructure and configuration files.
//!
//! infralint checks Dockerfiles, Makefiles, `.env` files and JSON/YAML
//! documents for syntax problems, security hazards and departures from
//! common practice, and reports every finding with a severity, category
//! and suggested fix.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.infralint.yml` loading
//! - [`dockerfile`] - Dockerfile parser and rules
//! - [`envfile`] - `.env` parser and rules
//! - [`error`] - Error types and result aliases
//! - [`fs`] - Bounded file reading and discovery
//! - [`lint`] - Diagnostics, rule catalogs, results and formatters
//! - [`makefile`] - Makefile parser and rules
//! - [`secrets`] - Hardcoded credential detection
//! - [`shell`] - Shell command heuristics
//! - [`structured`] - JSON and YAML documents
//! - [`validator`] - The [`validator::Validator`] trait and [`validator::Linter`]
//!
//! # Example
//!
//! ```
//! use infralint::envfile::EnvFileValidator;
//! use infralint::validator::Validator;
//!
//! let result = EnvFileValidator::new().validate_content("PORT=8080\nPORT=9090\n");
//!
//! assert!(result.valid);
//! assert!(result.has_rule("env.duplicate_key"));
//! ```

pub mod cli;
pub mod config;
pub mod dockerfile;
pub mod envfile;
pub mod error;
pub mod fs;
pub mod lint;
pub mod makefile;
pub mod secrets;
pub mod shell;
pub mod structured;
pub mod validator;

pub use error::{LintError, Result};
