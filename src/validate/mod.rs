// src/validate/mod.rs

//! Validation of converted documents.
//!
//! - [`builtin`] is a structural OpenAPI 3 check used when no validator
//!   command is configured.
//! - [`command`] runs an external validator.

pub mod builtin;
pub mod command;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::discover::TestItem;

pub use builtin::BuiltinValidator;
pub use command::CommandValidator;

/// Verdict of a validator plus whatever it had to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub diagnostics: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            valid: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn invalid(diagnostics: Vec<String>) -> Self {
        Self {
            valid: false,
            diagnostics,
        }
    }
}

/// Checks a converted document.
///
/// Validators never fail: problems running the check are reported as an
/// invalid outcome with a diagnostic.
pub trait Validator: Send + Sync {
    fn validate<'a>(
        &'a self,
        item: &'a TestItem,
        document: &'a Value,
    ) -> Pin<Box<dyn Future<Output = ValidationOutcome> + Send + 'a>>;
}
