// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every input also has an environment fallback using the GitHub Actions
//! names (`INPUT_*`, `GITHUB_*`), so the binary can be dropped into a
//! workflow step without a wrapper script. Empty environment values are
//! treated as absent.

use std::path::PathBuf;
use std::str::FromStr;

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};

use crate::types::ListFilesMode;

/// Command-line arguments for `pathfilter`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pathfilter",
    version,
    about = "Report which named path filters match the files changed between two revisions.",
    long_about = None
)]
pub struct CliArgs {
    /// Filter definitions as inline YAML or JSON text.
    #[arg(long, env = "INPUT_FILTERS", value_name = "TEXT")]
    pub filters: Option<String>,

    /// Read filter definitions from a `.yml`, `.yaml`, `.json` or `.toml` file.
    #[arg(long, value_name = "PATH", value_parser = parse_path)]
    pub filters_file: Option<PathBuf>,

    /// Base revision. Changes are computed from its merge-base with `--ref`.
    #[arg(long, env = "INPUT_BASE", value_name = "REF")]
    pub base: Option<String>,

    /// Head revision (defaults to `HEAD` when only `--base` is given).
    #[arg(long = "ref", env = "INPUT_REF", value_name = "REF")]
    pub head_ref: Option<String>,

    /// Repository directory in which git is run.
    #[arg(
        long,
        env = "INPUT_WORKING_DIRECTORY",
        value_name = "DIR",
        default_value = ".",
        value_parser = parse_path
    )]
    pub working_directory: PathBuf,

    /// Also emit `<name>_files` in the given encoding.
    #[arg(
        long,
        env = "INPUT_LIST_FILES",
        value_name = "MODE",
        default_value = "none",
        value_parser = parse_list_files
    )]
    pub list_files: ListFilesMode,

    /// Drop deleted files before matching.
    #[arg(
        long,
        env = "INPUT_IGNORE_DELETIONS",
        value_parser = FalseyValueParser::new()
    )]
    pub ignore_deletions: bool,

    /// Append outputs to this file instead of printing them to stdout.
    #[arg(long, env = "GITHUB_OUTPUT", value_name = "PATH", value_parser = parse_path)]
    pub output_file: Option<PathBuf>,

    /// Name of the CI event that triggered the run.
    #[arg(long, env = "GITHUB_EVENT_NAME", value_name = "NAME")]
    pub event_name: Option<String>,

    /// Path to the CI event payload (JSON).
    #[arg(long, env = "GITHUB_EVENT_PATH", value_name = "PATH", value_parser = parse_path)]
    pub event_path: Option<PathBuf>,

    /// Commit that triggered the run; used as head for push events.
    #[arg(long, env = "GITHUB_SHA", value_name = "SHA")]
    pub sha: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PATHFILTER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse, validate and compile filters, print them, but don't run git.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Replace empty-string inputs with `None`.
    pub fn normalized(mut self) -> Self {
        self.filters = non_empty(self.filters);
        self.base = non_empty(self.base);
        self.head_ref = non_empty(self.head_ref);
        self.event_name = non_empty(self.event_name);
        self.sha = non_empty(self.sha);
        self.output_file = self.output_file.filter(|p| !p.as_os_str().is_empty());
        self.event_path = self.event_path.filter(|p| !p.as_os_str().is_empty());
        self.filters_file = self.filters_file.filter(|p| !p.as_os_str().is_empty());
        if self.working_directory.as_os_str().is_empty() {
            self.working_directory = PathBuf::from(".");
        }
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_list_files(s: &str) -> Result<ListFilesMode, String> {
    ListFilesMode::from_str(s)
}

/// Accepts the empty string, which `normalized` then drops. clap's own
/// `PathBuf` parser rejects it.
fn parse_path(s: &str) -> Result<PathBuf, String> {
    Ok(PathBuf::from(s.trim()))
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse().normalized()
}
