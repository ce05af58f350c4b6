//! Per-format validators and the [`Linter`] facade.
//!
//! Every supported format implements [`Validator`]: one entry point that
//! turns a file into a complete [`ValidationResult`]. Read failures never
//! surface as `Err`; they become a single `config.file_access` Error.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::LintConfig;
use crate::dockerfile::DockerfileValidator;
use crate::envfile::EnvFileValidator;
use crate::error::{LintError, Result};
use crate::fs::SafeFileReader;
use crate::lint::{FileReport, RuleInfo, ValidationResult};
use crate::makefile::MakefileValidator;
use crate::secrets::SecretDetector;
use crate::shell::ShellHeuristics;
use crate::structured::StructuredValidator;

/// Supported artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum FileKind {
    Dockerfile,
    Makefile,
    Env,
    Json,
    Yaml,
}

impl FileKind {
    /// All kinds, in listing order.
    pub const ALL: [FileKind; 5] = [
        FileKind::Dockerfile,
        FileKind::Makefile,
        FileKind::Env,
        FileKind::Json,
        FileKind::Yaml,
    ];

    /// Detect the kind from a file name.
    ///
    /// # Example
    ///
    /// ```
    /// use infralint::validator::FileKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(FileKind::detect(Path::new("api/Dockerfile.prod")), Some(FileKind::Dockerfile));
    /// assert_eq!(FileKind::detect(Path::new(".env.local")), Some(FileKind::Env));
    /// assert_eq!(FileKind::detect(Path::new("rules.mk")), Some(FileKind::Makefile));
    /// assert_eq!(FileKind::detect(Path::new("notes.txt")), None);
    /// ```
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_lowercase();

        if name == "dockerfile" || name.starts_with("dockerfile.") || name.ends_with(".dockerfile") {
            return Some(FileKind::Dockerfile);
        }
        if name == "makefile" || name == "gnumakefile" || name.ends_with(".mk") {
            return Some(FileKind::Makefile);
        }
        if name == ".env" || name.starts_with(".env.") || name.ends_with(".env") {
            return Some(FileKind::Env);
        }

        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(FileKind::Json),
            "yml" | "yaml" => Some(FileKind::Yaml),
            _ => None,
        }
    }

    /// Lower-case name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Dockerfile => "dockerfile",
            FileKind::Makefile => "makefile",
            FileKind::Env => "env",
            FileKind::Json => "json",
            FileKind::Yaml => "yaml",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One artifact format's validation entry point.
pub trait Validator {
    /// The kind this validator handles.
    fn kind(&self) -> FileKind;

    /// Validate already-loaded content.
    fn validate_content(&self, content: &str) -> ValidationResult;

    /// Describe the catalog rules, in order.
    fn rules(&self) -> Vec<RuleInfo>;

    /// Remove the listed rules from the catalog.
    fn disable_rules(&mut self, ids: &[String]);

    /// Validate a file without a root restriction.
    fn validate(&self, path: &Path) -> ValidationResult {
        self.validate_with(&SafeFileReader::unrestricted(), path)
    }

    /// Validate a file read through `reader`.
    fn validate_with(&self, reader: &SafeFileReader, path: &Path) -> ValidationResult {
        match reader.read_to_string(path) {
            Ok(content) => {
                let result = self.validate_content(&content);
                debug!(
                    path = %path.display(),
                    kind = %self.kind(),
                    errors = result.summary.error_count,
                    warnings = result.summary.warning_count,
                    "validated"
                );
                result
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read file");
                ValidationResult::read_failure(path, &err)
            }
        }
    }
}

/// One validator per [`FileKind`], in [`FileKind::ALL`] order.
///
/// The shell and secret pattern tables are built once and shared.
pub fn builtin_validators() -> Vec<Box<dyn Validator>> {
    let shell = Arc::new(ShellHeuristics::with_builtins());
    let detector = Arc::new(SecretDetector::with_builtins());

    vec![
        Box::new(DockerfileValidator::with_shared(shell.clone(), detector.clone())),
        Box::new(MakefileValidator::with_shared(shell, detector.clone())),
        Box::new(EnvFileValidator::with_detector(detector.clone())),
        Box::new(StructuredValidator::with_detector(FileKind::Json, detector.clone())),
        Box::new(StructuredValidator::with_detector(FileKind::Yaml, detector)),
    ]
}

/// Validators for every kind, configured from [`LintConfig`].
pub struct Linter {
    validators: Vec<Box<dyn Validator>>,
    reader: SafeFileReader,
}

impl Linter {
    /// Build a linter for files under `project_root`.
    pub fn new(config: &LintConfig, project_root: &Path) -> Result<Self> {
        let reader = if config.restrict_to_project {
            SafeFileReader::new(project_root)?
        } else {
            SafeFileReader::unrestricted()
        };
        let reader = reader.with_max_size(config.max_file_size);

        let mut validators = builtin_validators();
        for validator in &mut validators {
            validator.disable_rules(&config.disabled_rules);
        }

        Ok(Self { validators, reader })
    }

    /// The validator for `kind`.
    pub fn validator(&self, kind: FileKind) -> Option<&dyn Validator> {
        self.validators
            .iter()
            .find(|v| v.kind() == kind)
            .map(|v| v.as_ref())
    }

    /// Every validator, in [`FileKind::ALL`] order.
    pub fn validators(&self) -> impl Iterator<Item = &dyn Validator> {
        self.validators.iter().map(|v| v.as_ref())
    }

    /// Lint one file, detecting its kind unless `kind` is given.
    pub fn lint_file(&self, path: &Path, kind: Option<FileKind>) -> Result<FileReport> {
        let unsupported = || LintError::UnsupportedFile {
            path: path.to_path_buf(),
        };
        let kind = kind
            .or_else(|| FileKind::detect(path))
            .ok_or_else(unsupported)?;
        let validator = self.validator(kind).ok_or_else(unsupported)?;

        Ok(FileReport {
            path: path.to_path_buf(),
            kind: kind.to_string(),
            result: validator.validate_with(&self.reader, path),
        })
    }
}
