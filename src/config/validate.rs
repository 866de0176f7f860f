use std::path::PathBuf;

use crate::config::model::{ConfigFile, RawConfigFile, RunConfig};
use crate::errors::{Result, SpecsweepError};
use crate::types::Encoding;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::SpecsweepError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let converter_cmd = validate_converter(&raw)?;
        let validator_cmd = validate_validator(&raw)?;
        let encoding = validate_encoding(&raw)?;
        validate_default_path(&raw)?;

        let run = RunConfig {
            default_path: PathBuf::from(&raw.run.default_path),
            order: raw.run.order,
            converter_crash: raw.run.converter_crash,
            encoding,
        };
        Ok(ConfigFile::new_unchecked(run, converter_cmd, validator_cmd))
    }
}

fn validate_converter(cfg: &RawConfigFile) -> Result<String> {
    match cfg.converter.cmd.as_deref().map(str::trim) {
        Some(cmd) if !cmd.is_empty() => Ok(cmd.to_string()),
        Some(_) => Err(SpecsweepError::ConfigError(
            "[converter].cmd must not be empty".to_string(),
        )),
        None => Err(SpecsweepError::ConfigError(
            "no converter configured: set [converter].cmd or pass --converter".to_string(),
        )),
    }
}

fn validate_validator(cfg: &RawConfigFile) -> Result<Option<String>> {
    match cfg.validator.cmd.as_deref().map(str::trim) {
        Some("") => Err(SpecsweepError::ConfigError(
            "[validator].cmd must not be empty (omit it to use the built-in check)".to_string(),
        )),
        other => Ok(other.map(str::to_string)),
    }
}

fn validate_encoding(cfg: &RawConfigFile) -> Result<Encoding> {
    cfg.run
        .encoding
        .parse::<Encoding>()
        .map_err(|e| SpecsweepError::ConfigError(format!("[run].encoding: {e}")))
}

fn validate_default_path(cfg: &RawConfigFile) -> Result<()> {
    if cfg.run.default_path.trim().is_empty() {
        return Err(SpecsweepError::ConfigError(
            "[run].default_path must not be empty".to_string(),
        ));
    }
    Ok(())
}
