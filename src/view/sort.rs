//! Record ordering by a single field.
//!
//! Absent values always sort after present ones, in both directions.
//! Present values compare by type: numbers numerically, text with a
//! case-insensitive collation, anything else through its canonical text form.

use crate::model::{FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The active sort: one field, one direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Next sort after the user picks `field`.
    ///
    /// An explicit direction always wins. Otherwise picking the active field
    /// flips its direction and picking a different field starts ascending.
    #[must_use]
    pub fn select(current: Option<&Self>, field: &str, direction: Option<SortDirection>) -> Self {
        let direction = direction.unwrap_or_else(|| match current {
            Some(active) if active.field == field => active.direction.toggled(),
            _ => SortDirection::Asc,
        });
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

/// Precomputed comparison key for one field value.
///
/// Text keys carry the case-folded form so the collation does not lowercase
/// on every comparison.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SortKey {
    Absent,
    Integer(i64),
    Float(f64),
    Text { folded: String, raw: String },
}

impl SortKey {
    pub(crate) fn from_value(value: &FieldValue) -> Self {
        if !value.is_present() {
            return Self::Absent;
        }
        match value {
            FieldValue::Integer(i) => Self::Integer(*i),
            FieldValue::Float(f) if f.is_nan() => Self::Absent,
            FieldValue::Float(f) => Self::Float(*f),
            other => {
                let raw = other.as_text().map(|t| t.into_owned()).unwrap_or_default();
                Self::Text {
                    folded: raw.to_lowercase(),
                    raw,
                }
            }
        }
    }

    const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Re-key a number as text for columns that mix numbers and text.
    fn into_text(self) -> Self {
        let raw = match self {
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            other => return other,
        };
        Self::Text {
            folded: raw.clone(),
            raw,
        }
    }

    /// Compare two keys with absent-last semantics under `direction`.
    pub(crate) fn compare(&self, other: &Self, direction: SortDirection) -> Ordering {
        match (self, other) {
            (Self::Absent, Self::Absent) => Ordering::Equal,
            (Self::Absent, _) => Ordering::Greater,
            (_, Self::Absent) => Ordering::Less,
            _ => direction.apply(self.compare_present(other)),
        }
    }

    fn compare_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Integer(_) | Self::Float(_), Self::Integer(_) | Self::Float(_)) => {
                as_f64(self).total_cmp(&as_f64(other))
            }
            (
                Self::Text {
                    folded: fa,
                    raw: ra,
                },
                Self::Text {
                    folded: fb,
                    raw: rb,
                },
            ) => collate(fa, ra, fb, rb),
            (a, b) => a.clone().into_text().compare_present(&b.clone().into_text()),
        }
    }
}

fn as_f64(key: &SortKey) -> f64 {
    match key {
        SortKey::Integer(i) => *i as f64,
        SortKey::Float(f) => *f,
        _ => 0.0,
    }
}

/// Make a column of keys totally ordered.
///
/// Numbers and text do not share an order, so as soon as a column holds
/// both, every number is compared through its text form.
fn unify_column(keys: &mut [SortKey]) {
    let has_text = keys.iter().any(|k| matches!(k, SortKey::Text { .. }));
    let has_number = keys.iter().any(SortKey::is_numeric);
    if has_text && has_number {
        for key in keys.iter_mut() {
            if key.is_numeric() {
                *key = std::mem::replace(key, SortKey::Absent).into_text();
            }
        }
    }
}

/// Approximate collation: case-insensitive first, and of two strings
/// differing only in case the lowercase one comes first. Folded text is
/// compared by code point, so accented letters sort after `z`.
fn collate(folded_a: &str, raw_a: &str, folded_b: &str, raw_b: &str) -> Ordering {
    folded_a.cmp(folded_b).then_with(|| raw_b.cmp(raw_a))
}

/// Compare two records on the field named by `sort`.
///
/// A field missing on both records compares equal, so sorting by an
/// unknown field leaves the input order untouched.
pub fn compare<R: Record>(a: &R, b: &R, sort: &SortSpec) -> Ordering {
    let key_a = SortKey::from_value(&a.field(&sort.field));
    let key_b = SortKey::from_value(&b.field(&sort.field));
    key_a.compare(&key_b, sort.direction)
}

/// Order a subset of `records` by `sort`, returning indices into the slice.
///
/// `indices` selects and seeds the order (normally the filter result in
/// source order). The sort is stable. When `tie_breaker` names a field,
/// records with equal primary keys are further ordered by it, in the same
/// direction.
pub fn sorted_indices<R: Record>(
    records: &[R],
    indices: &[usize],
    sort: &SortSpec,
    tie_breaker: Option<&str>,
) -> Vec<usize> {
    let tie_breaker = tie_breaker.filter(|t| *t != sort.field);

    let mut primary: Vec<SortKey> = indices
        .iter()
        .map(|&idx| SortKey::from_value(&records[idx].field(&sort.field)))
        .collect();
    unify_column(&mut primary);

    let mut secondary: Vec<SortKey> = match tie_breaker {
        Some(field) => indices
            .iter()
            .map(|&idx| SortKey::from_value(&records[idx].field(field)))
            .collect(),
        None => Vec::new(),
    };
    unify_column(&mut secondary);

    let mut order: Vec<usize> = (0..indices.len()).collect();
    order.sort_by(|&a, &b| {
        primary[a]
            .compare(&primary[b], sort.direction)
            .then_with(|| match (secondary.get(a), secondary.get(b)) {
                (Some(sa), Some(sb)) => sa.compare(sb, sort.direction),
                _ => Ordering::Equal,
            })
    });

    order.into_iter().map(|pos| indices[pos]).collect()
}

/// Sort an owned collection of records by `sort`, then by `tie_breaker`.
pub fn sort_records<R: Record>(records: &mut Vec<R>, sort: &SortSpec, tie_breaker: Option<&str>) {
    let all: Vec<usize> = (0..records.len()).collect();
    let order = sorted_indices(records.as_slice(), &all, sort, tie_breaker);
    let mut slots: Vec<Option<R>> = records.drain(..).map(Some).collect();
    records.extend(order.into_iter().filter_map(|idx| slots[idx].take()));
}
