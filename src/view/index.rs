//! Distinct-value domains for filter dropdowns.

use crate::model::{FieldValue, Record};
use indexmap::IndexMap;

/// Distinct values per field, each list in first-seen order.
pub type FilterOptions = IndexMap<String, Vec<FieldValue>>;

/// Collect the distinct present values of each field in `fields`.
///
/// Absent, empty and whitespace-only values are skipped. List-valued
/// fields contribute their elements, so a certificate used by two
/// applications adds both application names to the `applications` domain.
pub fn build_filter_options<R, F>(records: &[R], fields: &[F]) -> FilterOptions
where
    R: Record,
    F: AsRef<str>,
{
    let mut options = FilterOptions::with_capacity(fields.len());
    for field in fields {
        let field = field.as_ref();
        let mut seen: Vec<FieldValue> = Vec::new();
        for record in records {
            collect_distinct(record.field(field), &mut seen);
        }
        options.insert(field.to_string(), seen);
    }

    tracing::debug!(
        fields = options.len(),
        records = records.len(),
        "built filter options"
    );
    options
}

fn collect_distinct(value: FieldValue, seen: &mut Vec<FieldValue>) {
    match value {
        FieldValue::List(items) => {
            for item in items {
                collect_distinct(item, seen);
            }
        }
        value if value.is_present() => {
            // Domains are dropdown-sized; a linear scan beats hashing floats.
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DynamicRecord;
    use serde_json::json;

    #[test]
    fn test_distinct_values_in_first_seen_order() {
        let records = vec![
            DynamicRecord::from_value(json!({"status": "valid", "apps": ["crm", "blog"]})),
            DynamicRecord::from_value(json!({"status": "expired", "apps": ["blog", " "]})),
            DynamicRecord::from_value(json!({"status": "valid", "apps": []})),
            DynamicRecord::from_value(json!({"status": null, "apps": ["payments"]})),
            DynamicRecord::from_value(json!({"status": "  "})),
        ];

        let options = build_filter_options(&records, &["status", "apps", "missing"]);

        assert_eq!(
            options["status"],
            vec![FieldValue::from("valid"), FieldValue::from("expired")]
        );
        assert_eq!(
            options["apps"],
            vec![
                FieldValue::from("crm"),
                FieldValue::from("blog"),
                FieldValue::from("payments")
            ]
        );
        assert!(options["missing"].is_empty());
        assert_eq!(
            options.keys().collect::<Vec<_>>(),
            vec!["status", "apps", "missing"]
        );
    }

    #[test]
    fn test_numeric_values_are_kept() {
        let records = vec![
            DynamicRecord::from_value(json!({"keySize": 2048})),
            DynamicRecord::from_value(json!({"keySize": 4096})),
            DynamicRecord::from_value(json!({"keySize": 2048})),
        ];
        let options = build_filter_options(&records, &["keySize"]);
        assert_eq!(
            options["keySize"],
            vec![FieldValue::Integer(2048), FieldValue::Integer(4096)]
        );
    }
}
