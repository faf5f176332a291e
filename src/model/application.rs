//! Applications and the services they run.

use super::{FieldValue, Record, RecordSchema};
use serde::{Deserialize, Serialize};

/// An application owning services, certificates and keys.
///
/// The `*_count` fields are filled in by [`super::CbomDocument::normalize`]
/// when the source document leaves them out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    /// Deployment environment ("production", "staging", ...)
    pub environment: Option<String>,
    pub services: Vec<String>,
    pub algorithm_count: Option<i64>,
    pub certificate_count: Option<i64>,
    pub key_count: Option<i64>,
}

impl RecordSchema for Application {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "owner",
        "environment",
        "services",
        "algorithmCount",
        "certificateCount",
        "keyCount",
    ];
    const COLLECTION: &'static str = "applications";
    const FILTERABLE: &'static [&'static str] = &["owner", "environment", "services"];
    const SORTABLE: &'static [&'static str] = &[
        "name",
        "owner",
        "environment",
        "algorithmCount",
        "certificateCount",
        "keyCount",
    ];
    const DEFAULT_SORT: Option<&'static str> = Some("name");
}

impl Record for Application {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "owner" => self.owner.as_deref().into(),
            "environment" => self.environment.as_deref().into(),
            "services" => FieldValue::list(&self.services),
            "algorithmCount" => self.algorithm_count.into(),
            "certificateCount" => self.certificate_count.into(),
            "keyCount" => self.key_count.into(),
            _ => FieldValue::Absent,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        Self::FIELDS.to_vec()
    }
}
