use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde_json::Value;
use specsweep::discover::TestItem;
use specsweep::validate::{ValidationOutcome, Validator};

/// A validator that rejects a fixed set of paths and accepts everything
/// else.
#[derive(Debug, Clone, Default)]
pub struct ScriptedValidator {
    invalid: HashSet<PathBuf>,
}

impl ScriptedValidator {
    pub fn accepting_all() -> Self {
        Self::default()
    }

    pub fn rejecting<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            invalid: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for ScriptedValidator {
    fn validate<'a>(
        &'a self,
        item: &'a TestItem,
        _document: &'a Value,
    ) -> Pin<Box<dyn Future<Output = ValidationOutcome> + Send + 'a>> {
        let outcome = if self.invalid.contains(&item.path) {
            ValidationOutcome::invalid(vec![format!("{} rejected by script", item)])
        } else {
            ValidationOutcome::valid()
        };
        Box::pin(async move { outcome })
    }
}
