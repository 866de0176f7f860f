use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::discover::TestItem;
use crate::validate::{ValidationOutcome, Validator};

/// Structural OpenAPI 3 check.
///
/// Covers the parts of the document every consumer relies on: the version
/// field, `info`, `paths` and `servers`. Schema-level validation needs an
/// external validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinValidator;

impl BuiltinValidator {
    pub fn check(document: &Value) -> ValidationOutcome {
        let mut problems = Vec::new();

        let Some(root) = document.as_object() else {
            return ValidationOutcome::invalid(vec!["document is not an object".to_string()]);
        };

        match root.get("openapi").and_then(Value::as_str) {
            Some(v) if v.starts_with("3.") => {}
            Some(v) => problems.push(format!("openapi: unsupported version {v:?}")),
            None => problems.push("openapi: missing or not a string".to_string()),
        }

        match root.get("info").and_then(Value::as_object) {
            Some(info) => {
                for field in ["title", "version"] {
                    if !info.get(field).is_some_and(Value::is_string) {
                        problems.push(format!("info.{field}: missing or not a string"));
                    }
                }
            }
            None => problems.push("info: missing or not an object".to_string()),
        }

        match root.get("paths").and_then(Value::as_object) {
            Some(paths) => {
                // Specification extensions (`x-*`) may sit beside the paths.
                let stray = paths
                    .keys()
                    .filter(|k| !k.starts_with('/') && !k.starts_with("x-"));
                for key in stray {
                    problems.push(format!("paths: {key:?} does not start with '/'"));
                }
            }
            None => problems.push("paths: missing or not an object".to_string()),
        }

        if let Some(servers) = root.get("servers") {
            match servers.as_array() {
                Some(list) => {
                    for (i, server) in list.iter().enumerate() {
                        if !server.get("url").is_some_and(Value::is_string) {
                            problems.push(format!("servers[{i}].url: missing or not a string"));
                        }
                    }
                }
                None => problems.push("servers: not an array".to_string()),
            }
        }

        if problems.is_empty() {
            ValidationOutcome::valid()
        } else {
            ValidationOutcome::invalid(problems)
        }
    }
}

impl Validator for BuiltinValidator {
    fn validate<'a>(
        &'a self,
        _item: &'a TestItem,
        document: &'a Value,
    ) -> Pin<Box<dyn Future<Output = ValidationOutcome> + Send + 'a>> {
        Box::pin(async move { Self::check(document) })
    }
}
