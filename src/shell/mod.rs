//! Shell command heuristics shared by the Dockerfile and Makefile catalogs.

pub mod patterns;

pub use patterns::{
    DangerousPattern, PackageManager, ShellHeuristics, DANGEROUS_COMMANDS, PACKAGE_MANAGERS,
    VERIFICATION_TOKENS,
};
