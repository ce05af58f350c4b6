//! Safe file access and project file discovery.
//!
//! [`SafeFileReader`] is the only way validators touch the filesystem: it
//! refuses paths that resolve outside the permitted roots and files larger
//! than the configured limit.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LintError, Result};
use crate::validator::FileKind;

/// Default maximum file size (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Reads whole files after checking path boundaries and size.
#[derive(Debug, Clone)]
pub struct SafeFileReader {
    roots: Vec<PathBuf>,
    max_size: u64,
}

impl SafeFileReader {
    /// Reader restricted to `root` and its descendants.
    pub fn new(root: &Path) -> Result<Self> {
        Ok(Self {
            roots: vec![root.canonicalize()?],
            max_size: DEFAULT_MAX_FILE_SIZE,
        })
    }

    /// Reader without a root restriction.
    pub fn unrestricted() -> Self {
        Self {
            roots: Vec::new(),
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Set the size limit in bytes.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Read `path` as UTF-8 text (invalid sequences are replaced).
    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        let resolved = path.canonicalize()?;

        if !self.roots.is_empty() && !self.roots.iter().any(|root| resolved.starts_with(root)) {
            return Err(LintError::PathViolation {
                path: path.to_path_buf(),
            });
        }

        let size = fs::metadata(&resolved)?.len();
        if size > self.max_size {
            return Err(LintError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.max_size,
            });
        }

        let bytes = fs::read(&resolved)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Find every lintable file under `dir`, sorted by path.
///
/// Directories whose name is in `exclude` are not entered.
pub fn discover_files(dir: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, exclude, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, exclude: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !exclude.iter().any(|e| e == name.as_ref()) {
                walk(&path, exclude, files)?;
            }
        } else if file_type.is_file() && FileKind::detect(&path).is_some() {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_file_inside_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join(".env");
        fs::write(&file, "A=1\n").unwrap();

        let reader = SafeFileReader::new(temp.path()).unwrap();
        assert_eq!(reader.read_to_string(&file).unwrap(), "A=1\n");
    }

    #[test]
    fn refuses_file_outside_root() {
        let root = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let file = other.path().join("Dockerfile");
        fs::write(&file, "FROM alpine").unwrap();

        let reader = SafeFileReader::new(root.path()).unwrap();
        let err = reader.read_to_string(&file).unwrap_err();
        assert!(matches!(err, LintError::PathViolation { .. }));
    }

    #[test]
    fn refuses_traversal_out_of_root() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(temp.path().join("secret.env"), "A=1").unwrap();

        let reader = SafeFileReader::new(&project).unwrap();
        let err = reader
            .read_to_string(&project.join("../secret.env"))
            .unwrap_err();
        assert!(matches!(err, LintError::PathViolation { .. }));
    }

    #[test]
    fn refuses_large_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("Makefile");
        fs::write(&file, "x".repeat(64)).unwrap();

        let reader = SafeFileReader::new(temp.path()).unwrap().with_max_size(16);
        let err = reader.read_to_string(&file).unwrap_err();
        assert!(matches!(err, LintError::FileTooLarge { size: 64, limit: 16, .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let reader = SafeFileReader::unrestricted();
        let err = reader
            .read_to_string(Path::new("/definitely/not/here/.env"))
            .unwrap_err();
        assert!(matches!(err, LintError::Io(_)));
    }

    #[test]
    fn discovers_known_files_and_skips_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Dockerfile"), "FROM alpine").unwrap();
        fs::write(temp.path().join("README.md"), "# hi").unwrap();
        fs::create_dir(temp.path().join("svc")).unwrap();
        fs::write(temp.path().join("svc/.env"), "A=1").unwrap();
        fs::create_dir(temp.path().join("node_modules")).unwrap();
        fs::write(temp.path().join("node_modules/package.json"), "{}").unwrap();

        let files = discover_files(temp.path(), &["node_modules".to_string()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![PathBuf::from("Dockerfile"), PathBuf::from("svc/.env")]
        );
    }
}
