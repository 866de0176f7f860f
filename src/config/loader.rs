// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the configuration for a CLI invocation.
///
/// - An explicit `--config` must exist.
/// - Otherwise `Specsweep.toml` is read if present, or defaults are used.
/// - `--converter`, `--validator` and `--encoding` override file values.
pub fn load_for_cli(args: &CliArgs) -> Result<ConfigFile> {
    let mut raw = match args.config.as_deref() {
        Some(path) => load_from_path(path)?,
        None => {
            let path = default_config_path();
            if path.is_file() {
                load_from_path(&path)?
            } else {
                debug!(path = %path.display(), "no config file found; using defaults");
                RawConfigFile::default()
            }
        }
    };

    apply_cli_overrides(&mut raw, args);
    ConfigFile::try_from(raw)
}

/// Layer CLI flags over values read from the config file.
pub fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(cmd) = &args.converter {
        raw.converter.cmd = Some(cmd.clone());
    }
    if let Some(cmd) = &args.validator {
        raw.validator.cmd = Some(cmd.clone());
    }
    if let Some(encoding) = &args.encoding {
        raw.run.encoding = encoding.clone();
    }
}

/// Config file looked up in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Specsweep.toml")
}
