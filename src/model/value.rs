//! Dynamic field values exposed by records to the view engine.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single attribute value read from a record by field name.
///
/// `Absent` covers both a missing field and an explicit null. Blank text is
/// kept as-is but reports [`FieldValue::is_present`] as `false`, so the
/// indexer and the evaluator treat it the same as `Absent`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Absent,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Build a list value from anything yielding convertible items.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Whether this value carries data the engine should look at.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Text(s) => !s.trim().is_empty(),
            Self::List(items) => items.iter().any(Self::is_present),
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) => true,
        }
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Numeric view of the value, if it is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Canonical text form used for display, free-text search and
    /// string-coerced comparisons. `None` for absent values.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Absent => None,
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Integer(i) => Some(Cow::Owned(i.to_string())),
            Self::Float(f) => Some(Cow::Owned(f.to_string())),
            Self::List(items) => Some(Cow::Owned(
                items
                    .iter()
                    .filter_map(Self::as_text)
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }

    /// Case-insensitive substring test. `needle_lower` must already be lowercased.
    ///
    /// Lists match if any present element matches.
    #[must_use]
    pub fn contains_text(&self, needle_lower: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item.contains_text(needle_lower)),
            value if value.is_present() => value
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(needle_lower)),
            _ => false,
        }
    }

    /// Equality-filter semantics: exact match, or membership for lists.
    #[must_use]
    pub fn matches_exact(&self, target: &Self) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item.scalar_eq(target)),
            scalar => scalar.scalar_eq(target),
        }
    }

    fn scalar_eq(&self, other: &Self) -> bool {
        if !self.is_present() || !other.is_present() {
            return false;
        }
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Integer(_) | Self::Float(_), Self::Integer(_) | Self::Float(_)) => {
                self.as_number() == other.as_number()
            }
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            // Filter dropdowns hand over strings; match them against the
            // canonical text of scalar fields.
            (Self::Text(text), scalar @ (Self::Integer(_) | Self::Float(_) | Self::Bool(_)))
            | (scalar @ (Self::Integer(_) | Self::Float(_) | Self::Bool(_)), Self::Text(text)) => {
                scalar.as_text().is_some_and(|s| s == text.as_str())
            }
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<chrono::NaiveDate> for FieldValue {
    fn from(value: chrono::NaiveDate) -> Self {
        Self::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence() {
        assert!(!FieldValue::Absent.is_present());
        assert!(!FieldValue::from("   ").is_present());
        assert!(!FieldValue::List(vec![]).is_present());
        assert!(!FieldValue::list(["", " "]).is_present());
        assert!(FieldValue::from(0_i64).is_present());
        assert!(FieldValue::from(false).is_present());
        assert!(FieldValue::list(["web-portal"]).is_present());
    }

    #[test]
    fn test_canonical_text() {
        assert_eq!(FieldValue::from(-10_i64).to_string(), "-10");
        assert_eq!(FieldValue::from(2.0_f64).to_string(), "2");
        assert_eq!(FieldValue::from(1.5_f64).to_string(), "1.5");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::list(["a", "b"]).to_string(), "a, b");
        assert_eq!(FieldValue::Absent.to_string(), "");
    }

    #[test]
    fn test_contains_text_is_case_insensitive_and_list_aware() {
        let issuer = FieldValue::from("DigiCert Global G2");
        assert!(issuer.contains_text("digicert"));
        assert!(!issuer.contains_text("sectigo"));

        let apps = FieldValue::list(["Payments API", "Web Portal"]);
        assert!(apps.contains_text("portal"));
        assert!(!FieldValue::Absent.contains_text(""));
    }

    #[test]
    fn test_matches_exact() {
        let status = FieldValue::from("expired");
        assert!(status.matches_exact(&"expired".into()));
        assert!(!status.matches_exact(&"Expired".into()));

        let apps = FieldValue::list(["billing", "crm"]);
        assert!(apps.matches_exact(&"crm".into()));
        assert!(!apps.matches_exact(&"cr".into()));

        assert!(FieldValue::from(2048_i64).matches_exact(&FieldValue::from(2048.0_f64)));
        assert!(FieldValue::from(2048_i64).matches_exact(&"2048".into()));
        assert!(FieldValue::from(true).matches_exact(&"true".into()));
        assert!(!FieldValue::from(true).matches_exact(&FieldValue::from(1_i64)));
    }

    #[test]
    fn test_absent_never_matches() {
        assert!(!FieldValue::Absent.matches_exact(&FieldValue::Absent));
        assert!(!FieldValue::Absent.matches_exact(&"x".into()));
        assert!(!FieldValue::from("").matches_exact(&"".into()));
    }

    #[test]
    fn test_untagged_json_roundtrip_shapes() {
        let value: FieldValue = serde_json::from_str("[\"a\", 3, null]").expect("valid json");
        assert_eq!(
            value,
            FieldValue::List(vec!["a".into(), FieldValue::Integer(3), FieldValue::Absent])
        );
        let value: FieldValue = serde_json::from_str("null").expect("valid json");
        assert_eq!(value, FieldValue::Absent);
    }
}
