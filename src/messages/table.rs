// src/messages/table.rs
use super::Category;
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Text fields tried, in order, on nested records of the mapping shape.
const NESTED_TEXT_FIELDS: &[&str] = &[
    "error_message",
    "validation_message",
    "information_text",
    "message",
];

/// One message table exactly as the backend sent it.
///
/// The payload is either a sequence of records (`[{error_code, error_message}]`)
/// or a mapping from code to text; the raw JSON is kept so the persisted
/// snapshot stays byte-compatible with other readers of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTable(Value);

impl MessageTable {
    pub fn empty() -> Self {
        Self(Value::Array(Vec::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    pub fn to_json(&self) -> String {
        self.0.to_string()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Number of records or mapping keys; other shapes count as zero.
    pub fn len(&self) -> usize {
        match &self.0 {
            Value::Array(records) => records.len(),
            Value::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn normalize(&self, category: Category) -> NormalizedTable {
        normalize(&self.0, category)
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// Uppercased code to display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedTable {
    entries: BTreeMap<String, String>,
}

impl NormalizedTable {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .get(&code.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn insert(&mut self, code: &str, text: impl Into<String>) {
        self.entries.insert(code.trim().to_uppercase(), text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for NormalizedTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut table = Self::default();
        for (code, text) in iter {
            table.insert(&code, text);
        }
        table
    }
}

/// Flattens either table shape into `CODE -> text`. Total: never fails,
/// anything unrecognised yields an empty table.
pub fn normalize(table: &Value, category: Category) -> NormalizedTable {
    let mut normalized = NormalizedTable::default();

    match table {
        Value::Array(records) => {
            for record in records {
                let Value::Object(fields) = record else {
                    continue;
                };
                let code = first_text(fields, &[category.code_field(), "code"]);
                if code.trim().is_empty() {
                    continue;
                }
                let text = first_text(fields, &[category.text_field(), "message"]);
                normalized.insert(&code, text);
            }
        }
        Value::Object(entries) => {
            for (code, value) in entries {
                if code.trim().is_empty() {
                    continue;
                }
                let text = match value {
                    Value::Object(fields) => {
                        let found = first_text(fields, NESTED_TEXT_FIELDS);
                        if found.is_empty() {
                            value.to_string()
                        } else {
                            found
                        }
                    }
                    other => scalar_text(other),
                };
                normalized.insert(code, text);
            }
        }
        _ => {}
    }

    normalized
}

// First field holding non-empty text wins.
fn first_text(fields: &Map<String, Value>, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .map(scalar_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_use_category_fields() {
        let table = json!([
            {"validation_code": "va002", "validation_message": "Required"},
            {"validation_code": "VA005", "validation_message": "Invalid email"}
        ]);
        let normalized = normalize(&table, Category::Validation);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized.get("VA002"), Some("Required"));
        assert_eq!(normalized.get("va005"), Some("Invalid email"));
    }

    #[test]
    fn records_fall_back_to_generic_fields() {
        let table = json!([
            {"code": "ea003", "message": "Invalid characters."},
            {"information_code": "IA001", "message": "Address saved"},
            {"error_code": "", "code": "EA004", "error_message": "Required field"}
        ]);
        let errors = normalize(&table, Category::Error);
        assert_eq!(errors.get("EA003"), Some("Invalid characters."));
        assert_eq!(errors.get("EA004"), Some("Required field"));

        let info = normalize(&table, Category::Information);
        assert_eq!(info.get("IA001"), Some("Address saved"));
    }

    #[test]
    fn records_without_code_are_skipped() {
        let table = json!([
            {"error_message": "orphan"},
            {"error_code": "   ", "error_message": "blank"},
            "EA001",
            null,
            42
        ]);
        assert!(normalize(&table, Category::Error).is_empty());
    }

    #[test]
    fn mapping_with_string_values() {
        let table = json!({"ea006": "Invalid pincode", "EA007": 7, "EA008": null});
        let normalized = normalize(&table, Category::Error);
        assert_eq!(normalized.get("EA006"), Some("Invalid pincode"));
        assert_eq!(normalized.get("EA007"), Some("7"));
        assert_eq!(normalized.get("EA008"), Some(""));
    }

    #[test]
    fn mapping_with_nested_records() {
        let table = json!({
            "IA001": {"information_text": "Address added"},
            "IA002": {"message": "Address updated"},
            "IA003": {"other": 1}
        });
        let normalized = normalize(&table, Category::Information);
        assert_eq!(normalized.get("IA001"), Some("Address added"));
        assert_eq!(normalized.get("IA002"), Some("Address updated"));
        assert_eq!(normalized.get("IA003"), Some(r#"{"other":1}"#));
    }

    #[test]
    fn unknown_shapes_are_empty() {
        for value in [json!(null), json!([]), json!({}), json!("text"), json!(3), json!(true)] {
            assert!(normalize(&value, Category::Error).is_empty(), "{}", value);
        }
    }

    #[test]
    fn table_emptiness_counts_records_and_keys() {
        assert!(MessageTable::empty().is_empty());
        assert!(MessageTable::from_value(json!(null)).is_empty());
        assert!(MessageTable::from_value(json!({})).is_empty());
        assert_eq!(MessageTable::from_value(json!({"EA006": "x"})).len(), 1);
        assert_eq!(MessageTable::from_value(json!([{}, {}])).len(), 2);
    }

    #[test]
    fn persisted_json_normalizes_identically() {
        let table = MessageTable::from_value(json!([
            {"error_code": "EP016", "error_message": "Username already exists."}
        ]));
        let reloaded = MessageTable::from_json(&table.to_json()).unwrap();
        assert_eq!(reloaded, table);
        assert_eq!(
            reloaded.normalize(Category::Error),
            table.normalize(Category::Error)
        );
    }
}
