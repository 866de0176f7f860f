use std::path::Path;

use serde_json::Value;

/// Substrings a file name must contain to be considered during a directory
/// scan.
const CANDIDATE_MARKERS: [&str; 2] = [".yaml", ".json"];

/// Extension filter for non-forced candidates.
///
/// Matches on a substring of the file name, so `petstore.json.bak` and
/// `api.yaml.orig` are candidates while `api.yml` is not.
pub fn is_candidate_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| CANDIDATE_MARKERS.iter().any(|m| name.contains(m)))
}

/// Source-format version marker carried by a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMarker {
    /// `swagger: "2.0"` and friends.
    Swagger(String),
    /// `openapi: "3.x.y"`.
    OpenApi(String),
}

impl VersionMarker {
    /// Read the marker from a decoded document, if it carries one.
    ///
    /// `swagger` wins over `openapi` when both are present. A field that is
    /// null, `false`, zero or the empty string does not count.
    pub fn detect(content: &Value) -> Option<Self> {
        if let Some(v) = content.get("swagger").and_then(marker_text) {
            return Some(VersionMarker::Swagger(v));
        }
        content
            .get("openapi")
            .and_then(marker_text)
            .map(VersionMarker::OpenApi)
    }

    pub fn version(&self) -> &str {
        match self {
            VersionMarker::Swagger(v) | VersionMarker::OpenApi(v) => v,
        }
    }
}

fn marker_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Decoded content of an admitted document, tagged with its version marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub content: Value,
    pub marker: VersionMarker,
}

impl ParsedDocument {
    /// Admit a decoded value. Returns `None` when there is no version marker.
    pub fn admit(content: Value) -> Option<Self> {
        let marker = VersionMarker::detect(&content)?;
        Some(Self { content, marker })
    }

    pub fn title(&self) -> String {
        info_field(&self.content, "title")
    }

    pub fn version(&self) -> String {
        info_field(&self.content, "version")
    }

    /// Primary endpoint: the `host` of a Swagger document or the first
    /// server URL of an OpenAPI one, `relative` when absent.
    pub fn endpoint(&self) -> String {
        let endpoint = match self.marker {
            VersionMarker::Swagger(_) => self.content.get("host").and_then(Value::as_str),
            VersionMarker::OpenApi(_) => self
                .content
                .get("servers")
                .and_then(Value::as_array)
                .and_then(|servers| servers.first())
                .and_then(|server| server.get("url"))
                .and_then(Value::as_str),
        };
        match endpoint {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => "relative".to_string(),
        }
    }
}

fn info_field(content: &Value, field: &str) -> String {
    match content.get("info").and_then(|info| info.get(field)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
