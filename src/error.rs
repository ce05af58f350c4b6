//! Error types for infralint operations.
//!
//! This module defines [`LintError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Problems with a single artifact (unreadable, unparsable, rule findings)
//!   are reported as diagnostics inside a `ValidationResult`, never as `Err`
//! - `LintError` covers what happens around artifacts: reader policy
//!   violations, configuration problems, unknown file kinds
//! - Use `anyhow::Error` (via `LintError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for infralint operations.
#[derive(Debug, Error)]
pub enum LintError {
    /// Path resolves outside the permitted roots.
    #[error("Path escapes permitted roots: {path}")]
    PathViolation { path: PathBuf },

    /// File is larger than the configured limit.
    #[error("File too large: {path} ({size} bytes, limit {limit})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// No validator handles this file.
    #[error("Unsupported file type: {path}")]
    UnsupportedFile { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for infralint operations.
pub type Result<T> = std::result::Result<T, LintError>;
