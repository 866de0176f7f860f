// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - [`model`] holds the raw TOML mapping and the validated `ConfigFile`.
//! - [`loader`] reads the file and layers CLI overrides on top.
//! - [`validate`] turns a `RawConfigFile` into a `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_for_cli, load_from_path};
pub use model::{
    CommandSection, ConfigFile, RawConfigFile, RunConfig, RunSection, DEFAULT_CORPUS_PATH,
};
