// src/discover/mod.rs

//! Corpus discovery and admission.
//!
//! - [`admission`] decides whether a candidate file is looked at at all, and
//!   whether its decoded content carries a recognised version marker.
//! - [`decode`] turns raw bytes into a JSON value, trying JSON then YAML.
//! - [`orchestrator`] walks the path arguments and feeds admitted documents
//!   to the scheduler as `RuntimeEvent`s.

pub mod admission;
pub mod decode;
pub mod orchestrator;

use std::fmt;
use std::path::{Path, PathBuf};

pub use admission::{is_candidate_name, ParsedDocument, VersionMarker};
pub use decode::{decode_document, parse_structured, DecodeError};
pub use orchestrator::{Candidate, Orchestrator, PathSpecs};

/// A discovered candidate file and the context it is tested under.
///
/// Created during discovery; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub path: PathBuf,
    /// Named directly on the command line, so the extension filter is skipped.
    pub forced: bool,
    /// Found under a `--fail` path: conversion plus validation should fail.
    pub expect_failure: bool,
}

impl TestItem {
    pub fn new(path: impl Into<PathBuf>, forced: bool, expect_failure: bool) -> Self {
        Self {
            path: path.into(),
            forced,
            expect_failure,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for TestItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
