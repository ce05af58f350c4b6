//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::lint::OutputFormat;
use crate::validator::FileKind;

/// infralint - Lint Dockerfiles, Makefiles, env files and JSON/YAML.
#[derive(Debug, Parser)]
#[command(name = "infralint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides .infralint.yml in the project root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lint files (default: every recognised file under the project root)
    Lint(LintArgs),

    /// List the built-in rules
    Rules(RulesArgs),
}

/// Arguments for the `lint` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LintArgs {
    /// Files or directories to lint
    pub paths: Vec<PathBuf>,

    /// Output format: human, json
    #[arg(long, env = "INFRALINT_FORMAT", default_value = "human")]
    pub format: OutputFormat,

    /// Lint every file as this kind instead of detecting it
    #[arg(long, value_enum)]
    pub kind: Option<FileKind>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Only list rules for this kind
    #[arg(long, value_enum)]
    pub kind: Option<FileKind>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
