//! Config payloads.
//!
//! A payload is a `serde_json::Value`: a typed recursive variant of literals,
//! lists and insertion-ordered maps. Built-in actions read payloads either as
//! a map of entries or as a list of keys; [`ValueExt::keys`] defines the
//! latter.

use crate::{Error, Result};

/// A single configuration payload.
pub type ConfigValue = serde_json::Value;

/// Insertion-ordered mapping of names to payloads.
pub type ConfigMap = serde_json::Map<String, ConfigValue>;

/// Action-name to payload table handed to `process`.
pub type ConfigSpec = ConfigMap;

/// Payload interpretation helpers.
pub trait ValueExt {
    /// Reads the payload as a list of keys.
    ///
    /// - `null` and `""` yield no keys
    /// - strings are split on `,`, trimming whitespace and dropping empty parts
    /// - lists contribute the keys of every element, in order
    /// - maps contribute the names whose value is truthy
    /// - numbers yield their display form; booleans yield nothing
    fn keys(&self) -> Vec<String>;

    /// Loose truthiness: `null`, `false`, `0` and `""` are falsy.
    fn is_truthy(&self) -> bool;

    /// Short name of the variant, used in error messages.
    fn kind(&self) -> &'static str;
}

impl ValueExt for ConfigValue {
    fn keys(&self) -> Vec<String> {
        match self {
            ConfigValue::Null | ConfigValue::Bool(_) => Vec::new(),
            ConfigValue::Number(n) => vec![n.to_string()],
            ConfigValue::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
            ConfigValue::Array(items) => items.iter().flat_map(ValueExt::keys).collect(),
            ConfigValue::Object(map) => map
                .iter()
                .filter(|(_, v)| v.is_truthy())
                .map(|(k, _)| k.clone())
                .collect(),
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Null => false,
            ConfigValue::Bool(b) => *b,
            ConfigValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            ConfigValue::String(s) => !s.is_empty(),
            ConfigValue::Array(_) | ConfigValue::Object(_) => true,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Number(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::Array(_) => "list",
            ConfigValue::Object(_) => "object",
        }
    }
}

/// Parses a JSON document into a single spec.
pub fn spec_from_str(json: &str) -> Result<ConfigSpec> {
    Ok(serde_json::from_str(json)?)
}

/// Splits a value into an ordered sequence of specs.
///
/// Accepts one object or a list of objects; anything else is rejected.
pub fn specs_from_value(value: ConfigValue) -> Result<Vec<ConfigSpec>> {
    match value {
        ConfigValue::Object(map) => Ok(vec![map]),
        ConfigValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                ConfigValue::Object(map) => Ok(map),
                other => Err(Error::NotASpec(other.kind())),
            })
            .collect(),
        other => Err(Error::NotASpec(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comma_string_splits_and_trims() {
        assert_eq!(json!("a, b,,c").keys(), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_and_null_have_no_keys() {
        assert!(json!("").keys().is_empty());
        assert!(ConfigValue::Null.keys().is_empty());
    }

    #[test]
    fn map_keys_follow_truthiness() {
        let value = json!({"force": true, "dry": false, "name": "x"});
        assert_eq!(value.keys(), vec!["force", "name"]);
    }
}
