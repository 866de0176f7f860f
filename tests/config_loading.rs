// tests/config_loading.rs

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use specsweep::cli::CliArgs;
use specsweep::config::{load_and_validate, load_for_cli, DEFAULT_CORPUS_PATH};
use specsweep::errors::SpecsweepError;
use specsweep::types::{CrashPolicy, Encoding, QueueOrder};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_config_file_is_loaded() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Specsweep.toml");
    fs::write(
        &path,
        r#"
[run]
default_path = "corpus/"
order = "fifo"
converter_crash = "fail"
encoding = "latin1"

[converter]
cmd = "swagger2openapi"

[validator]
cmd = "openapi-lint"
"#,
    )?;

    let config = load_and_validate(&path)?;
    assert_eq!(config.run.default_path, PathBuf::from("corpus/"));
    assert_eq!(config.run.order, QueueOrder::Fifo);
    assert_eq!(config.run.converter_crash, CrashPolicy::Fail);
    assert_eq!(config.run.encoding, Encoding::Latin1);
    assert_eq!(config.converter_cmd, "swagger2openapi");
    assert_eq!(config.validator_cmd.as_deref(), Some("openapi-lint"));
    Ok(())
}

#[test]
fn minimal_config_uses_defaults() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("c.toml");
    fs::write(&path, "[converter]\ncmd = \"conv\"\n")?;

    let config = load_and_validate(&path)?;
    assert_eq!(config.run.default_path, PathBuf::from(DEFAULT_CORPUS_PATH));
    assert_eq!(config.run.order, QueueOrder::Lifo);
    assert_eq!(config.run.converter_crash, CrashPolicy::Pass);
    assert_eq!(config.run.encoding, Encoding::Utf8);
    assert!(config.validator_cmd.is_none());
    Ok(())
}

#[test]
fn cli_flags_override_file_values() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("c.toml");
    fs::write(&path, "[converter]\ncmd = \"from-file\"\n")?;

    let args = CliArgs {
        config: Some(path.display().to_string()),
        converter: Some("from-cli".to_string()),
        validator: Some("check".to_string()),
        encoding: Some("latin1".to_string()),
        ..CliArgs::default()
    };
    let config = load_for_cli(&args)?;
    assert_eq!(config.converter_cmd, "from-cli");
    assert_eq!(config.validator_cmd.as_deref(), Some("check"));
    assert_eq!(config.run.encoding, Encoding::Latin1);
    Ok(())
}

#[test]
fn missing_converter_is_a_config_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("c.toml");
    fs::write(&path, "[run]\norder = \"lifo\"\n")?;

    let err = load_and_validate(&path).unwrap_err();
    assert!(matches!(err, SpecsweepError::ConfigError(ref msg) if msg.contains("no converter")));
    Ok(())
}

#[test]
fn unknown_encoding_is_a_config_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("c.toml");
    fs::write(&path, "[converter]\ncmd = \"c\"\n")?;

    let args = CliArgs {
        config: Some(path.display().to_string()),
        encoding: Some("ebcdic".to_string()),
        ..CliArgs::default()
    };
    let err = load_for_cli(&args).unwrap_err();
    assert!(matches!(err, SpecsweepError::ConfigError(ref msg) if msg.starts_with("[run].encoding")));
    Ok(())
}

#[test]
fn invalid_order_is_a_toml_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("c.toml");
    fs::write(&path, "[run]\norder = \"random\"\n[converter]\ncmd = \"c\"\n")?;

    assert!(matches!(
        load_and_validate(&path),
        Err(SpecsweepError::TomlError(_))
    ));
    Ok(())
}

#[test]
fn explicit_config_path_must_exist() {
    let args = CliArgs {
        config: Some("/definitely/not/here/Specsweep.toml".to_string()),
        converter: Some("c".to_string()),
        ..CliArgs::default()
    };
    assert!(matches!(load_for_cli(&args), Err(SpecsweepError::IoError(_))));
}

#[test]
fn empty_validator_command_is_rejected() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("c.toml");
    fs::write(&path, "[converter]\ncmd = \"c\"\n[validator]\ncmd = \"  \"\n")?;

    assert!(matches!(
        load_and_validate(&path),
        Err(SpecsweepError::ConfigError(_))
    ));
    Ok(())
}
