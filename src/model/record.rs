//! The record abstraction consumed by the view engine.

use super::FieldValue;

/// A uniform-shape data item that exposes its attributes by field name.
///
/// Every record in one collection must expose the same set of field names.
/// Unknown names are not an error: [`Record::field`] returns
/// [`FieldValue::Absent`] and the engine treats the value as missing.
pub trait Record {
    /// Value of the named field, `FieldValue::Absent` if there is none.
    fn field(&self, name: &str) -> FieldValue;

    /// Every field this record exposes, in display order.
    fn field_names(&self) -> Vec<&str>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> FieldValue {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<&str> {
        (**self).field_names()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> FieldValue {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<&str> {
        (**self).field_names()
    }
}

/// Records with a fixed schema known at compile time.
///
/// The constants drive [`crate::view::ViewConfig::for_schema`], which builds
/// the default view for a collection of this type.
pub trait RecordSchema {
    /// All field names, in display order.
    const FIELDS: &'static [&'static str];

    /// Human-readable name of the collection (e.g. "certificates").
    const COLLECTION: &'static str;

    /// Fields offered as equality-filter dropdowns.
    const FILTERABLE: &'static [&'static str];

    /// Fields the user may sort by.
    const SORTABLE: &'static [&'static str];

    /// Field sorted ascending when the view opens, if any.
    const DEFAULT_SORT: Option<&'static str> = None;

    /// Preset view configuration for this record type.
    #[must_use]
    fn view_config() -> crate::view::ViewConfig
    where
        Self: Sized,
    {
        crate::view::ViewConfig::for_schema::<Self>()
    }
}
