//! JSON catalogs, flat (`{"a.b": "x"}`) or nested (`{"a": {"b": "x"}}`).

use crate::translations::Translations;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// JSON import/export errors.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("top-level JSON value must be an object")]
    NotAnObject,

    #[error("unsupported value at {key:?}: only strings, numbers, booleans and objects are allowed")]
    UnsupportedValue { key: String },

    #[error("key {key:?} is both a translation and a namespace")]
    Conflict { key: String },
}

/// Flatten a JSON document into dotted keys.
///
/// Object keys are joined with `.`; a document that is already flat comes
/// out unchanged. Numbers and booleans keep their JSON text.
pub fn flatten_json(value: &Value) -> Result<BTreeMap<String, String>, JsonError> {
    let Value::Object(map) = value else {
        return Err(JsonError::NotAnObject);
    };

    let mut out = BTreeMap::new();
    flatten_into(map, "", &mut out)?;
    Ok(out)
}

fn flatten_into(
    map: &Map<String, Value>,
    prefix: &str,
    out: &mut BTreeMap<String, String>,
) -> Result<(), JsonError> {
    for (key, value) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::String(s) => {
                out.insert(full, s.clone());
            }
            Value::Number(n) => {
                out.insert(full, n.to_string());
            }
            Value::Bool(b) => {
                out.insert(full, b.to_string());
            }
            Value::Object(nested) => flatten_into(nested, &full, out)?,
            Value::Array(_) | Value::Null => return Err(JsonError::UnsupportedValue { key: full }),
        }
    }
    Ok(())
}

/// Export as a flat object.
pub fn to_flat_json(translations: &Translations) -> Value {
    Value::Object(
        translations
            .to_map()
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
    )
}

/// Export as nested objects.
///
/// Fails when a key holds a value and also has children (`item` next to
/// `item.one`); the flat form can represent that, the nested one cannot.
pub fn to_nested_json(translations: &Translations) -> Result<Value, JsonError> {
    let mut root = Map::new();

    for (key, value) in translations.to_map() {
        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, parents)) = parts.split_last() else {
            continue;
        };

        let mut node = &mut root;
        for (depth, part) in parents.iter().enumerate() {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            node = match entry {
                Value::Object(child) => child,
                _ => {
                    return Err(JsonError::Conflict {
                        key: parts[..=depth].join("."),
                    })
                }
            };
        }

        if node.contains_key(*last) {
            return Err(JsonError::Conflict { key });
        }
        node.insert(last.to_string(), Value::String(value));
    }

    Ok(Value::Object(root))
}

impl Translations {
    /// Parse a flat or nested JSON catalog.
    pub fn from_json_str(content: &str) -> Result<Self, JsonError> {
        let value: Value = serde_json::from_str(content)?;
        Ok(flatten_json(&value)?.into_iter().collect())
    }
}
