//! Lint command implementation.
//!
//! The `infralint lint` command validates the given files, or every
//! recognised file under the project root.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cli::args::LintArgs;
use crate::config::{load_config, LintConfig};
use crate::error::Result;
use crate::fs::discover_files;
use crate::lint::{FileReport, HumanFormatter, JsonFormatter, LintFormatter, OutputFormat, Severity};
use crate::validator::Linter;

use super::dispatcher::{Command, CommandResult, EXIT_FAILURE, EXIT_NO_FILES};

/// The lint command implementation.
pub struct LintCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    color: bool,
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(project_root: &Path, args: LintArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            color: false,
            args,
        }
    }

    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &LintArgs {
        &self.args
    }

    /// Files named on the command line, with directories expanded.
    fn collect_files(&self, config: &LintConfig) -> Result<Vec<PathBuf>> {
        if self.args.paths.is_empty() {
            return discover_files(&self.project_root, &config.exclude);
        }

        let mut files = Vec::new();
        for path in &self.args.paths {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                self.project_root.join(path)
            };
            if path.is_dir() {
                files.extend(discover_files(&path, &config.exclude)?);
            } else {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Whether any report has a finding at or above the failing severity.
    fn should_fail(&self, config: &LintConfig, reports: &[FileReport]) -> bool {
        let threshold = if self.args.strict {
            Severity::Warning
        } else {
            config.fail_on.threshold()
        };
        reports
            .iter()
            .flat_map(|r| r.result.diagnostics())
            .any(|d| d.severity >= threshold)
    }

    fn write_reports(&self, reports: &[FileReport], out: &mut dyn Write) -> std::io::Result<()> {
        let mut out = out;
        match self.args.format {
            OutputFormat::Json => JsonFormatter::new().format(reports, &mut out),
            OutputFormat::Human => HumanFormatter::new(self.color).format(reports, &mut out),
        }
    }
}

impl Command for LintCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let linter = Linter::new(&config, &self.project_root)?;

        let files = self.collect_files(&config)?;
        if files.is_empty() {
            writeln!(out, "No lintable files found in {}", self.project_root.display())?;
            return Ok(CommandResult::failure(EXIT_NO_FILES));
        }
        debug!(files = files.len(), "linting");

        let reports = files
            .iter()
            .map(|file| linter.lint_file(file, self.args.kind))
            .collect::<Result<Vec<_>>>()?;

        self.write_reports(&reports, out)?;

        let failed = self.should_fail(&config, &reports);
        info!(files = reports.len(), failed, "lint finished");

        if failed {
            Ok(CommandResult::failure(EXIT_FAILURE))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn run(temp: &TempDir, args: LintArgs) -> (CommandResult, String) {
        let mut out = Vec::new();
        let result = LintCommand::new(temp.path(), args).execute(&mut out).unwrap();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_project_has_nothing_to_lint() {
        let temp = TempDir::new().unwrap();
        let (result, output) = run(&temp, LintArgs::default());

        assert_eq!(result.exit_code, EXIT_NO_FILES);
        assert!(output.contains("No lintable files"));
    }

    #[test]
    fn errors_fail_the_run() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Dockerfile"), "RUN echo hi\n").unwrap();

        let (result, output) = run(&temp, LintArgs::default());

        assert_eq!(result.exit_code, EXIT_FAILURE);
        assert!(output.contains("error[dockerfile.from_required]"));
    }

    #[test]
    fn warnings_pass_unless_strict() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "A=1\nA=2\n").unwrap();

        let (result, _) = run(&temp, LintArgs::default());
        assert!(result.success);

        let strict = LintArgs {
            strict: true,
            ..Default::default()
        };
        let (result, _) = run(&temp, strict);
        assert_eq!(result.exit_code, EXIT_FAILURE);
    }

    #[test]
    fn fail_on_warning_from_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".infralint.yml"), "fail_on: warning\n").unwrap();
        fs::write(temp.path().join(".env"), "A=1\nA=2\n").unwrap();

        let (result, _) = run(&temp, LintArgs::default());
        assert_eq!(result.exit_code, EXIT_FAILURE);
    }

    #[test]
    fn info_never_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "FEATURE=yes\n").unwrap();

        let strict = LintArgs {
            strict: true,
            ..Default::default()
        };
        let (result, output) = run(&temp, strict);
        assert!(result.success, "{}", output);
    }

    #[test]
    fn explicit_paths_and_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("deploy")).unwrap();
        fs::write(temp.path().join("deploy").join("values.yaml"), "a: 1\n").unwrap();
        fs::write(temp.path().join("Dockerfile"), "RUN echo hi\n").unwrap();

        let args = LintArgs {
            paths: vec![PathBuf::from("deploy")],
            format: OutputFormat::Json,
            ..Default::default()
        };
        let (result, output) = run(&temp, args);

        assert!(result.success);
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["summary"]["files"], 1);
        assert_eq!(json["files"][0]["kind"], "yaml");
    }

    #[test]
    fn unsupported_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "hi").unwrap();

        let args = LintArgs {
            paths: vec![PathBuf::from("notes.txt")],
            ..Default::default()
        };
        let mut out = Vec::new();
        assert!(LintCommand::new(temp.path(), args).execute(&mut out).is_err());
    }
}
