// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{CrashPolicy, Encoding, QueueOrder};

/// Corpus scanned when no paths are given on the command line.
pub const DEFAULT_CORPUS_PATH: &str = "../openapi-directory/APIs/";

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [run]
/// default_path = "../openapi-directory/APIs/"
/// order = "lifo"
/// converter_crash = "pass"
/// encoding = "utf8"
///
/// [converter]
/// cmd = "swagger2openapi-cli"
///
/// [validator]
/// cmd = "openapi-lint"
/// ```
///
/// All sections are optional and have reasonable defaults, but a converter
/// command must be present once CLI overrides are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Run behaviour from `[run]`.
    #[serde(default)]
    pub run: RunSection,

    /// External converter from `[converter]`.
    #[serde(default)]
    pub converter: CommandSection,

    /// External validator from `[validator]`. Without a command the built-in
    /// structural check is used.
    #[serde(default)]
    pub validator: CommandSection,
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// Directory scanned when no paths are given.
    #[serde(default = "default_corpus_path")]
    pub default_path: String,

    /// `"lifo"` (default) or `"fifo"`.
    #[serde(default)]
    pub order: QueueOrder,

    /// `"pass"` (default) or `"fail"`; see [`CrashPolicy`].
    #[serde(default)]
    pub converter_crash: CrashPolicy,

    /// Input encoding name; checked during validation.
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_corpus_path() -> String {
    DEFAULT_CORPUS_PATH.to_string()
}

fn default_encoding() -> String {
    "utf8".to_string()
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            default_path: default_corpus_path(),
            order: QueueOrder::default(),
            converter_crash: CrashPolicy::default(),
            encoding: default_encoding(),
        }
    }
}

/// `[converter]` / `[validator]` section: a shell command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandSection {
    pub cmd: Option<String>,
}

/// Validated run behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub default_path: PathBuf,
    pub order: QueueOrder,
    pub converter_crash: CrashPolicy,
    pub encoding: Encoding,
}

/// Validated configuration. Construct via `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub run: RunConfig,
    pub converter_cmd: String,
    pub validator_cmd: Option<String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        run: RunConfig,
        converter_cmd: String,
        validator_cmd: Option<String>,
    ) -> Self {
        Self {
            run,
            converter_cmd,
            validator_cmd,
        }
    }
}
