//! Record predicates: free-text search plus per-field equality filters.
//!
//! All active criteria are AND-combined. Absent values never satisfy a
//! criterion that is actually restricting something.

use crate::model::{FieldValue, Record};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where a free-text search looks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Every searchable field of the record
    #[default]
    All,
    /// A single named field
    Field(String),
}

impl SearchField {
    /// Parse user input where the literal `"all"` selects every field.
    pub fn parse(field: impl AsRef<str>) -> Self {
        let field = field.as_ref().trim();
        if field.is_empty() || field.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Field(field.to_string())
        }
    }
}

/// Free-text search criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchSpec {
    pub term: String,
    pub field: SearchField,
}

impl SearchSpec {
    pub fn new(term: impl Into<String>, field: SearchField) -> Self {
        Self {
            term: term.into(),
            field,
        }
    }

    /// Whether this search restricts anything (non-blank term).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.term.trim().is_empty()
    }

    /// Lowercased, trimmed term, or `None` when the search is inactive.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        self.is_active().then(|| self.term.trim().to_lowercase())
    }
}

/// Value selected in an equality-filter dropdown.
///
/// Serialized as the bare field value, with `All` written as the string
/// `"all"`. Reading `"all"` (any case) or `null` yields `All`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FilterValue {
    /// The "all" entry: no restriction
    #[default]
    All,
    Value(FieldValue),
}

impl FilterValue {
    /// Parse dropdown text where `"all"` means no restriction.
    pub fn parse(value: impl AsRef<str>) -> Self {
        Self::from(FieldValue::Text(value.as_ref().to_string()))
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a record value passes this filter.
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match self {
            Self::All => true,
            Self::Value(target) => value.matches_exact(target),
        }
    }
}

impl From<FieldValue> for FilterValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Absent => Self::All,
            FieldValue::Text(text) if text.trim().eq_ignore_ascii_case("all") => Self::All,
            value => Self::Value(value),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::from(FieldValue::Text(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Value(value.into())
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        FieldValue::deserialize(deserializer).map(Self::from)
    }
}

/// Equality filters keyed by field, in the order they were first set.
pub type FilterMap = IndexMap<String, FilterValue>;

/// The complete filter state a record is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct FilterSet<'a> {
    pub search: &'a SearchSpec,
    pub filters: &'a FilterMap,
    /// Fields an "all" search covers; empty means every field of the record
    pub searchable: &'a [String],
}

impl FilterSet<'_> {
    /// Whether nothing in the set restricts the collection.
    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        !self.search.is_active() && self.filters.values().all(FilterValue::is_all)
    }
}

/// Free-text match of `needle` (already lowercased) against a record.
pub fn matches_search<R: Record>(
    record: &R,
    needle: &str,
    field: &SearchField,
    searchable: &[String],
) -> bool {
    match field {
        SearchField::Field(name) => record.field(name).contains_text(needle),
        SearchField::All if searchable.is_empty() => record
            .field_names()
            .into_iter()
            .any(|name| record.field(name).contains_text(needle)),
        SearchField::All => searchable
            .iter()
            .any(|name| record.field(name).contains_text(needle)),
    }
}

/// Whether a record passes every equality filter.
pub fn matches_filters<R: Record>(record: &R, filters: &FilterMap) -> bool {
    filters
        .iter()
        .filter(|(_, value)| !value.is_all())
        .all(|(field, value)| value.accepts(&record.field(field)))
}

/// Evaluate a record against the full filter set.
pub fn matches<R: Record>(record: &R, set: &FilterSet<'_>) -> bool {
    if !matches_filters(record, set.filters) {
        return false;
    }
    match set.search.needle() {
        Some(needle) => matches_search(record, &needle, &set.search.field, set.searchable),
        None => true,
    }
}

/// Indices of the records that pass `set`, in source order.
pub fn filter_indices<R: Record>(records: &[R], set: &FilterSet<'_>) -> Vec<usize> {
    if set.is_pass_through() {
        return (0..records.len()).collect();
    }
    // Lowercase the needle once rather than per record.
    let needle = set.search.needle();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            matches_filters(*record, set.filters)
                && needle.as_deref().is_none_or(|n| {
                    matches_search(*record, n, &set.search.field, set.searchable)
                })
        })
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DynamicRecord;
    use serde_json::json;

    fn certs() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::from_value(json!({
                "id": "c1", "issuer": "DigiCert Global G2", "status": "valid",
                "applications": ["payments", "crm"]
            })),
            DynamicRecord::from_value(json!({
                "id": "c2", "issuer": "Let's Encrypt R3", "status": "expired",
                "applications": ["blog"]
            })),
            DynamicRecord::from_value(json!({
                "id": "c3", "issuer": null, "status": "expired", "applications": []
            })),
        ]
    }

    fn run(search: &SearchSpec, filters: &FilterMap) -> Vec<usize> {
        let set = FilterSet {
            search,
            filters,
            searchable: &[],
        };
        filter_indices(&certs(), &set)
    }

    #[test]
    fn test_search_all_fields_case_insensitive() {
        let search = SearchSpec::new("digicert", SearchField::All);
        assert_eq!(run(&search, &FilterMap::new()), vec![0]);
    }

    #[test]
    fn test_search_single_field() {
        let search = SearchSpec::new("c2", SearchField::Field("issuer".to_string()));
        assert!(run(&search, &FilterMap::new()).is_empty());

        let search = SearchSpec::new("c2", SearchField::Field("id".to_string()));
        assert_eq!(run(&search, &FilterMap::new()), vec![1]);
    }

    #[test]
    fn test_search_reaches_list_elements() {
        let search = SearchSpec::new("BLO", SearchField::Field("applications".to_string()));
        assert_eq!(run(&search, &FilterMap::new()), vec![1]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let search = SearchSpec::new("   ", SearchField::All);
        assert_eq!(run(&search, &FilterMap::new()), vec![0, 1, 2]);
    }

    #[test]
    fn test_equality_and_membership_filters() {
        let mut filters = FilterMap::new();
        filters.insert("status".to_string(), "expired".into());
        assert_eq!(run(&SearchSpec::default(), &filters), vec![1, 2]);

        filters.insert("applications".to_string(), "blog".into());
        assert_eq!(run(&SearchSpec::default(), &filters), vec![1]);

        filters.insert("applications".to_string(), FilterValue::All);
        assert_eq!(run(&SearchSpec::default(), &filters), vec![1, 2]);
    }

    #[test]
    fn test_absent_value_never_matches_filter() {
        let mut filters = FilterMap::new();
        filters.insert("issuer".to_string(), "".into());
        assert!(run(&SearchSpec::default(), &filters).is_empty());

        filters.insert("issuer".to_string(), "null".into());
        assert!(run(&SearchSpec::default(), &filters).is_empty());
    }

    #[test]
    fn test_search_and_filter_combine() {
        let mut filters = FilterMap::new();
        filters.insert("status".to_string(), "expired".into());
        let search = SearchSpec::new("encrypt", SearchField::All);
        assert_eq!(run(&search, &filters), vec![1]);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(SearchField::parse("ALL"), SearchField::All);
        assert_eq!(SearchField::parse(""), SearchField::All);
        assert_eq!(
            SearchField::parse("issuer"),
            SearchField::Field("issuer".to_string())
        );
        assert!(FilterValue::parse("all").is_all());
        assert_eq!(FilterValue::parse("rsa"), FilterValue::Value("rsa".into()));
    }

    #[test]
    fn test_all_text_converts_to_no_restriction() {
        assert!(FilterValue::from("all").is_all());
        assert!(FilterValue::from("All".to_string()).is_all());
        assert!(FilterValue::from(FieldValue::Absent).is_all());
        assert_eq!(
            FilterValue::from(FieldValue::Integer(2048)),
            FilterValue::Value(FieldValue::Integer(2048))
        );
    }

    #[test]
    fn test_filter_value_serde() {
        assert_eq!(serde_json::to_value(FilterValue::All).unwrap(), json!("all"));
        assert_eq!(serde_json::to_value(FilterValue::from(256)).unwrap(), json!(256));

        let all: FilterValue = serde_json::from_value(json!("ALL")).unwrap();
        assert!(all.is_all());
        let null: FilterValue = serde_json::from_value(json!(null)).unwrap();
        assert!(null.is_all());
        let text: FilterValue = serde_json::from_value(json!("expired")).unwrap();
        assert_eq!(text, FilterValue::from("expired"));
    }

    #[test]
    fn test_matches_single_record() {
        let records = certs();
        let mut filters = FilterMap::new();
        filters.insert("status".to_string(), "valid".into());
        let search = SearchSpec::new("crm", SearchField::All);
        let set = FilterSet {
            search: &search,
            filters: &filters,
            searchable: &["applications".to_string()],
        };
        assert!(matches(&records[0], &set));
        assert!(!matches(&records[1], &set));
    }
}
