// src/errors.rs

//! Crate-wide error type.
//!
//! Per-document problems (unreadable files, failed conversions, invalid
//! output) are not errors: they are warnings or verdicts recorded in the
//! run state. `SpecsweepError` covers what stops a run from starting or
//! continuing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpecsweepError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The runtime stopped listening before discovery was done.
    #[error("runtime event channel closed")]
    ChannelClosed,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SpecsweepError>;
