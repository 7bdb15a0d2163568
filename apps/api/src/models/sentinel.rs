//! Boundary normalization for the `"N/A"` placeholder.
//!
//! Callers mark unknown values with the literal string `"N/A"`. These
//! helpers turn that (and empty strings, nulls and missing keys) into `None`
//! or an empty list while deserializing, so rendering code works on
//! `Option`s and never sees the placeholder.

use serde::de::{DeserializeOwned, Error as DeError};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub const SENTINEL: &str = "N/A";

/// True for values that mean "nothing here".
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim();
            s.is_empty() || s == SENTINEL
        }
        _ => false,
    }
}

/// A scalar leaf as display text. Containers are not text.
pub fn text_of(value: &Value) -> Option<String> {
    if is_absent(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One display line for a `{name, summary}` style record.
pub fn record_line(record: &Map<String, Value>) -> Option<String> {
    let field = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| record.get(*k).and_then(text_of))
    };
    let name = field(&["name", "title"]);
    let summary = field(&["summary", "description"]);
    match (name, summary) {
        (Some(name), Some(summary)) => Some(format!("{name}: {summary}")),
        (Some(name), None) => Some(name),
        (None, Some(summary)) => Some(summary),
        (None, None) => None,
    }
}

/// Display lines from a list (or a lone scalar), dropping every absent element.
pub fn lines_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(record) => record_line(record),
                other => text_of(other),
            })
            .collect(),
        Value::Object(record) => record_line(record).into_iter().collect(),
        other => text_of(other).into_iter().collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// serde adapters
// ────────────────────────────────────────────────────────────────────────────

pub fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(&Value::deserialize(deserializer)?))
}

pub fn de_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lines_of(&Value::deserialize(deserializer)?))
}

/// A nested record. An absent value yields `T::default()`; a value that is
/// neither absent nor an object is a shape error.
pub fn de_record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(T::default());
    }
    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected an object, found {}",
            kind_of(&other)
        ))),
    }
}

/// A list of nested records. An absent value yields an empty list; a value
/// that is neither absent nor an array is a shape error.
pub fn de_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if is_absent(&value) {
        return Ok(Vec::new());
    }
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect(),
        other => Err(D::Error::custom(format!(
            "expected a list, found {}",
            kind_of(&other)
        ))),
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_and_blank_values_are_absent() {
        for v in [json!("N/A"), json!(" N/A "), json!(""), json!("   "), json!(null)] {
            assert!(is_absent(&v), "{v} should be absent");
            assert_eq!(text_of(&v), None);
        }
        assert!(!is_absent(&json!("n/a ok")));
    }

    #[test]
    fn test_scalars_become_text() {
        assert_eq!(text_of(&json!(" Lead ")), Some("Lead".to_string()));
        assert_eq!(text_of(&json!(3.8)), Some("3.8".to_string()));
        assert_eq!(text_of(&json!(true)), Some("true".to_string()));
        assert_eq!(text_of(&json!(["x"])), None);
        assert_eq!(text_of(&json!({"a": 1})), None);
    }

    #[test]
    fn test_lines_filter_every_sentinel_element() {
        assert!(lines_of(&json!(["N/A"])).is_empty());
        assert_eq!(lines_of(&json!(["N/A", "Rust", ""])), vec!["Rust"]);
        assert_eq!(lines_of(&json!("Only line")), vec!["Only line"]);
        assert!(lines_of(&json!("N/A")).is_empty());
    }

    #[test]
    fn test_record_lines() {
        assert_eq!(
            lines_of(&json!([
                {"name": "IEEE", "summary": "Member since 2019"},
                {"name": "ACM"},
                {"name": "N/A", "summary": "N/A"},
                {"summary": "Unnamed"}
            ])),
            vec!["IEEE: Member since 2019", "ACM", "Unnamed"]
        );
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Probe {
        #[serde(deserialize_with = "de_text")]
        label: Option<String>,
        #[serde(deserialize_with = "de_seq")]
        items: Vec<Probe>,
    }

    #[test]
    fn test_seq_accepts_absent_and_rejects_scalars() {
        let p: Probe = serde_json::from_value(json!({"items": "N/A"})).unwrap();
        assert!(p.items.is_empty());
        let p: Probe = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(p.items.is_empty());
        let err = serde_json::from_value::<Probe>(json!({"items": 5})).unwrap_err();
        assert!(err.to_string().contains("expected a list, found a number"));
    }

    #[test]
    fn test_missing_keys_default_to_absent() {
        let p: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p, Probe::default());
        let p: Probe = serde_json::from_value(json!({"items": [{"label": "N/A"}]})).unwrap();
        assert_eq!(p.items[0].label, None);
    }
}
