// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for github-status.
//!
//! Uses clap's derive API. There are no subcommands: every invocation
//! prints one report.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// YAML output for programmatic consumption
    Yaml,
    /// Markdown table
    Markdown,
}

/// Global output configuration passed to commands.
#[derive(Clone, Debug)]
pub struct OutputContext {
    /// Output format
    pub format: OutputFormat,
    /// Suppress non-essential output (spinner)
    pub quiet: bool,
    /// Whether stdout is a terminal (TTY)
    pub is_tty: bool,
    /// Whether text output is colored
    pub color: bool,
}

impl OutputContext {
    /// Creates an `OutputContext` from CLI arguments.
    pub fn from_cli(format: OutputFormat, quiet: bool) -> Self {
        Self {
            format,
            quiet,
            is_tty: std::io::stdout().is_terminal(),
            color: console::colors_enabled(),
        }
    }

    /// Returns true if the spinner should be shown.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && !self.quiet && matches!(self.format, OutputFormat::Text)
    }
}

/// github-status - the latest GitHub Actions runs of your repositories.
///
/// Without arguments, repositories are read from the repositories file
/// (`--config`, `GITHUB_STATUS_CONFIGURATION`, or
/// `~/.github-status-configuration.yaml`).
#[derive(Parser, Debug)]
#[command(name = "github-status")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repositories to report on (owner/repo)
    #[arg(value_name = "REPOSITORY")]
    pub repositories: Vec<String>,

    /// Repositories file to read when no repository is given
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "text", value_enum)]
    pub output: OutputFormat,

    /// Suppress non-essential output (spinner)
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Discard the cached token and authenticate again
    #[arg(long)]
    pub reauthenticate: bool,

    /// Print the verification URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}
