//! Schemaless records backed by a JSON object.

use super::{FieldValue, Record};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record whose fields are whatever keys its JSON object carries.
///
/// Key order of the source object is preserved, so table columns come out
/// in the order the document lists them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicRecord {
    fields: IndexMap<String, Value>,
}

impl DynamicRecord {
    #[must_use]
    pub const fn new(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value; non-objects become an empty record.
    ///
    /// Key order follows the `serde_json::Map`, which is sorted. Deserialize
    /// the record directly to keep document order.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self {
                fields: map.into_iter().collect(),
            },
            _ => Self::default(),
        }
    }
}

/// Convert a JSON value into the engine's value model.
///
/// Nested objects have no natural field semantics and are flattened into
/// their compact JSON text so that free-text search still reaches them.
fn json_to_field_value(value: &Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Absent,
        Value::Bool(b) => FieldValue::Bool(*b),
        Value::Number(n) => n
            .as_i64()
            .map(FieldValue::Integer)
            .or_else(|| n.as_f64().map(FieldValue::Float))
            .unwrap_or(FieldValue::Absent),
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Array(items) => FieldValue::List(items.iter().map(json_to_field_value).collect()),
        Value::Object(_) => FieldValue::Text(value.to_string()),
    }
}

impl Record for DynamicRecord {
    fn field(&self, name: &str) -> FieldValue {
        self.fields
            .get(name)
            .map_or(FieldValue::Absent, json_to_field_value)
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dynamic_record_fields() {
        let record = DynamicRecord::from_value(json!({
            "name": "TLS 1.2",
            "port": 443,
            "weight": 0.5,
            "deprecated": false,
            "hosts": ["a", "b"],
            "meta": {"k": "v"},
            "owner": null
        }));

        assert_eq!(record.field("name"), FieldValue::from("TLS 1.2"));
        assert_eq!(record.field("port"), FieldValue::Integer(443));
        assert_eq!(record.field("weight"), FieldValue::Float(0.5));
        assert_eq!(record.field("deprecated"), FieldValue::Bool(false));
        assert!(record.field("hosts").is_list());
        assert!(record.field("meta").contains_text("\"k\""));
        assert_eq!(record.field("owner"), FieldValue::Absent);
        assert_eq!(record.field("missing"), FieldValue::Absent);
    }

    #[test]
    fn test_deserialize_keeps_key_order() {
        let record: DynamicRecord =
            serde_json::from_str(r#"{"zeta": 1, "alpha": "x", "mid": [true]}"#)
                .expect("valid json");
        assert_eq!(record.field_names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_non_object_is_empty() {
        let record = DynamicRecord::from_value(json!([1, 2, 3]));
        assert!(record.field_names().is_empty());
    }
}
