//! Structured-text decoding: JSON first, YAML as the fallback.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::types::Encoding;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("not JSON ({json}) and not YAML ({yaml})")]
    Unparsable { json: String, yaml: String },
}

/// Decode raw file bytes with `encoding`, then parse them.
pub fn decode_document(bytes: &[u8], encoding: Encoding) -> Result<Value, DecodeError> {
    parse_structured(&encoding.decode(bytes))
}

/// Parse text as JSON, falling back to YAML.
pub fn parse_structured(text: &str) -> Result<Value, DecodeError> {
    let json_err = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let yaml = serde_yaml::from_str::<serde_yaml::Value>(text).map_err(|e| {
        DecodeError::Unparsable {
            json: json_err.to_string(),
            yaml: e.to_string(),
        }
    })?;

    yaml_to_json(yaml).ok_or_else(|| DecodeError::Unparsable {
        json: json_err.to_string(),
        yaml: "value has no JSON representation".to_string(),
    })
}

/// Convert a YAML tree into a JSON tree.
///
/// YAML allows non-string mapping keys (response codes such as `200:` are
/// common); they become their string form. Tags are dropped. Non-finite
/// floats have no JSON form and make the whole document unrepresentable.
fn yaml_to_json(value: serde_yaml::Value) -> Option<Value> {
    use serde_yaml::Value as Y;

    Some(match value {
        Y::Null => Value::Null,
        Y::Bool(b) => Value::Bool(b),
        Y::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                Value::Number(Number::from_f64(n.as_f64()?)?)
            }
        }
        Y::String(s) => Value::String(s),
        Y::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Option<Vec<_>>>()?,
        ),
        Y::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                map.insert(yaml_key(k)?, yaml_to_json(v)?);
            }
            Value::Object(map)
        }
        Y::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value as Y;

    match key {
        Y::String(s) => Some(s),
        Y::Null => Some("null".to_string()),
        Y::Bool(b) => Some(b.to_string()),
        Y::Number(n) => Some(n.to_string()),
        Y::Tagged(tagged) => yaml_key(tagged.value),
        Y::Sequence(_) | Y::Mapping(_) => None,
    }
}
