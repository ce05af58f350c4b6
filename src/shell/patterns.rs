//! Shell command heuristics.
//!
//! Fixed pattern tables shared by the Dockerfile `RUN` rules and the
//! Makefile recipe rules: a deny-list of dangerous commands, download
//! detection with verification tokens, and package-manager cleanup pairs.

use regex::Regex;

/// Dangerous command deny-list.
///
/// Each tuple contains (name, regex_pattern, description).
pub const DANGEROUS_COMMANDS: &[(&str, &str, &str)] = &[
    (
        "rm_root",
        r"\brm\s+(-[a-zA-Z]*[rR][a-zA-Z]*\s+)+(--no-preserve-root\s+)?/\*?(\s|;|&|\||$)",
        "recursive delete of the filesystem root",
    ),
    (
        "rm_home",
        r"\brm\s+(-[a-zA-Z]*[rR][a-zA-Z]*\s+)+~/?\*?(\s|;|&|\||$)",
        "recursive delete of the home directory",
    ),
    (
        "chmod_world_writable",
        r"\bchmod\s+(-[a-zA-Z]+\s+)*(0?777|a\+rwx|ugo\+rwx)\b",
        "world-writable permissions",
    ),
    (
        "pipe_to_shell",
        r"\b(curl|wget)\b[^|;&]*\|\s*(sudo\s+)?(ba|z|da)?sh\b",
        "piping a download straight into a shell",
    ),
    (
        "insecure_tls",
        r"\bcurl\b[^;&|]*\s(-k|--insecure)\b|\bwget\b[^;&|]*--no-check-certificate",
        "download with TLS verification disabled",
    ),
    (
        "fork_bomb",
        r":\(\)\s*\{\s*:\s*\|\s*:\s*&\s*\}\s*;\s*:",
        "fork bomb",
    ),
    ("mkfs", r"\bmkfs(\.[a-z0-9]+)?\b", "filesystem formatting"),
    (
        "dd_block_device",
        r"\bdd\b.*\bof=/dev/(sd|hd|nvme|xvd|disk)",
        "raw write to a block device",
    ),
];

/// Substrings that show a download is being verified.
pub const VERIFICATION_TOKENS: &[&str] = &[
    "sha256sum",
    "sha512sum",
    "sha1sum",
    "shasum",
    "md5sum",
    "gpg --verify",
    "gpg --batch --verify",
    "cosign verify",
    "minisign",
    "--checksum",
];

/// A package manager and the cleanup that should accompany its installs.
#[derive(Debug)]
pub struct PackageManager {
    /// Display name.
    pub name: &'static str,
    /// Regex matching an install invocation.
    pub install: &'static str,
    /// Any of these substrings counts as cleanup.
    pub cleanup: &'static [&'static str],
    /// Suggested remediation.
    pub suggestion: &'static str,
}

/// Package managers checked for missing cache cleanup.
pub const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager {
        name: "apt-get",
        install: r"\bapt(-get)?\s+(-\S+\s+)*install\b",
        cleanup: &["rm -rf /var/lib/apt/lists"],
        suggestion: "Append '&& rm -rf /var/lib/apt/lists/*' in the same RUN",
    },
    PackageManager {
        name: "apk",
        install: r"\bapk\s+(-\S+\s+)*add\b",
        cleanup: &["--no-cache", "rm -rf /var/cache/apk"],
        suggestion: "Use 'apk add --no-cache'",
    },
    PackageManager {
        name: "yum",
        install: r"\byum\s+(-\S+\s+)*install\b",
        cleanup: &["yum clean all", "rm -rf /var/cache/yum"],
        suggestion: "Append '&& yum clean all' in the same RUN",
    },
    PackageManager {
        name: "dnf",
        install: r"\b(micro)?dnf\s+(-\S+\s+)*install\b",
        cleanup: &["dnf clean all", "rm -rf /var/cache/dnf"],
        suggestion: "Append '&& dnf clean all' in the same RUN",
    },
    PackageManager {
        name: "zypper",
        install: r"\bzypper\s+(-\S+\s+)*(install|in)\b",
        cleanup: &["zypper clean"],
        suggestion: "Append '&& zypper clean --all' in the same RUN",
    },
    PackageManager {
        name: "pip",
        install: r"\bpip3?\s+(-\S+\s+)*install\b",
        cleanup: &["--no-cache-dir"],
        suggestion: "Use 'pip install --no-cache-dir'",
    },
];

/// A compiled deny-list entry.
#[derive(Debug)]
pub struct DangerousPattern {
    /// Pattern name (for debugging).
    pub name: &'static str,
    /// What the command does.
    pub description: &'static str,
    regex: Regex,
}

/// Compiled shell heuristics.
///
/// # Example
///
/// ```
/// use infralint::shell::ShellHeuristics;
///
/// let shell = ShellHeuristics::with_builtins();
///
/// assert_eq!(shell.dangerous_matches("rm -rf /").len(), 1);
/// assert!(shell.dangerous_matches("rm -rf /var/lib/apt/lists/*").is_empty());
/// assert!(shell.is_unverified_download("curl -fsSL https://get.example.sh -o install.sh"));
/// ```
pub struct ShellHeuristics {
    dangerous: Vec<DangerousPattern>,
    download: Regex,
    package_managers: Vec<(&'static PackageManager, Regex)>,
}

impl ShellHeuristics {
    /// Compile the built-in tables.
    pub fn with_builtins() -> Self {
        let dangerous = DANGEROUS_COMMANDS
            .iter()
            .map(|(name, pattern, description)| DangerousPattern {
                name,
                description,
                regex: Regex::new(pattern).expect("builtin dangerous pattern is valid"),
            })
            .collect();

        let package_managers = PACKAGE_MANAGERS
            .iter()
            .map(|pm| {
                (
                    pm,
                    Regex::new(pm.install).expect("builtin install pattern is valid"),
                )
            })
            .collect();

        Self {
            dangerous,
            download: Regex::new(r"\b(curl|wget)\b").expect("download pattern is valid"),
            package_managers,
        }
    }

    /// Deny-list entries matching `command`, in table order.
    pub fn dangerous_matches(&self, command: &str) -> Vec<&DangerousPattern> {
        self.dangerous
            .iter()
            .filter(|p| p.regex.is_match(command))
            .collect()
    }

    /// Whether `command` fetches something over the network.
    pub fn is_download(&self, command: &str) -> bool {
        self.download.is_match(command)
    }

    /// Whether `command` fetches something and never verifies it.
    pub fn is_unverified_download(&self, command: &str) -> bool {
        self.is_download(command) && !VERIFICATION_TOKENS.iter().any(|t| command.contains(t))
    }

    /// Package managers that install in `command` without their cleanup.
    pub fn missing_cleanup(&self, command: &str) -> Vec<&'static PackageManager> {
        self.package_managers
            .iter()
            .filter(|(pm, install)| {
                install.is_match(command) && !pm.cleanup.iter().any(|c| command.contains(c))
            })
            .map(|(pm, _)| *pm)
            .collect()
    }
}

impl Default for ShellHeuristics {
    fn default() -> Self {
        Self::with_builtins()
    }
}
