// src/logging.rs

//! Logging setup for `specsweep` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `-v` count (one for debug, two or more for trace)
//! 3. `SPECSWEEP_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `warn`
//!
//! Logs are sent to STDERR so that stdout carries only the test report.

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>, verbose: u8) -> Result<()> {
    let level = resolve_level(
        cli_level,
        verbose,
        std::env::var("SPECSWEEP_LOG").ok().as_deref(),
    );

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    Ok(())
}

/// Pick the effective level from the CLI flag, verbosity and env value.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    verbose: u8,
    env_value: Option<&str>,
) -> tracing::Level {
    if let Some(lvl) = cli_level {
        return level_from_log_level(lvl);
    }
    match verbose {
        0 => env_value
            .and_then(parse_level_str)
            .unwrap_or(tracing::Level::WARN),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}
