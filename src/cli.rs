// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

/// Command-line arguments for `specsweep`.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "specsweep",
    version,
    about = "Convert and validate a corpus of API specifications, reporting pass/fail counts.",
    long_about = None
)]
pub struct CliArgs {
    /// Specification files or directories to scan recursively.
    ///
    /// If neither paths nor `--fail` are given, the configured default
    /// directory is scanned.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Encoding for input files (utf8, latin1).
    #[arg(short, long, value_name = "ENC")]
    pub encoding: Option<String>,

    /// Path to specs expected to fail. May be given more than once.
    #[arg(short, long, value_name = "PATH", action = ArgAction::Append)]
    pub fail: Vec<PathBuf>,

    /// Stop on first failure.
    #[arg(short, long)]
    pub stop: bool,

    /// Do not show test passes on the console (for CI).
    #[arg(short, long)]
    pub quiet: bool,

    /// Ask the converter to resolve external references.
    #[arg(short, long)]
    pub resolve: bool,

    /// Increase verbosity. Repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to the config file (TOML).
    ///
    /// Default: `Specsweep.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Converter command line (overrides `[converter].cmd`).
    #[arg(long, value_name = "CMD")]
    pub converter: Option<String>,

    /// Validator command line (overrides `[validator].cmd`).
    #[arg(long, value_name = "CMD")]
    pub validator: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `-v`, then `SPECSWEEP_LOG`, then a default level is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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
    CliArgs::parse()
}
