//! Configuration loading for infralint.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use infralint::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".infralint.yml"), "max_file_size: 4096").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.max_file_size, 4096);
//! ```
//!
//! # Configuration File Locations
//!
//! `--config PATH` when given, otherwise `.infralint.yml` or
//! `.infralint.yaml` at the project root. Without either, defaults apply.

pub mod loader;
pub mod schema;

pub use loader::{find_config_file, load_config, load_config_file, parse_config, CONFIG_FILE_NAMES};
pub use schema::{FailLevel, LintConfig};
