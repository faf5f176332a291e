//! Cryptographic keys tracked by the inventory.

use super::{FieldValue, Record, RecordSchema};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Symmetric or asymmetric key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Symmetric,
    Asymmetric,
}

impl KeyType {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::Asymmetric => "asymmetric",
        }
    }
}

/// Lifecycle status of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    Active,
    Rotating,
    Retired,
    Compromised,
}

impl KeyStatus {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Rotating => "rotating",
            Self::Retired => "retired",
            Self::Compromised => "compromised",
        }
    }
}

/// A key and where it lives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CryptoKey {
    pub id: String,
    pub name: String,
    pub key_type: Option<KeyType>,
    pub algorithm: Option<String>,
    pub key_size: Option<u32>,
    pub status: Option<KeyStatus>,
    /// Storage backend ("hsm", "kms", "file", ...)
    pub storage: Option<String>,
    pub created_at: Option<NaiveDate>,
    pub last_rotated: Option<NaiveDate>,
    /// Rotation period in days
    pub rotation_days: Option<u32>,
    pub applications: Vec<String>,
}

impl RecordSchema for CryptoKey {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "keyType",
        "algorithm",
        "keySize",
        "status",
        "storage",
        "createdAt",
        "lastRotated",
        "rotationDays",
        "applications",
    ];
    const COLLECTION: &'static str = "keys";
    const FILTERABLE: &'static [&'static str] =
        &["keyType", "algorithm", "status", "storage", "applications"];
    const SORTABLE: &'static [&'static str] = &[
        "name",
        "algorithm",
        "keySize",
        "status",
        "createdAt",
        "lastRotated",
        "rotationDays",
    ];
    const DEFAULT_SORT: Option<&'static str> = Some("name");
}

impl Record for CryptoKey {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "keyType" => self.key_type.map(|t| t.label()).into(),
            "algorithm" => self.algorithm.as_deref().into(),
            "keySize" => self.key_size.into(),
            "status" => self.status.map(|s| s.label()).into(),
            "storage" => self.storage.as_deref().into(),
            "createdAt" => self.created_at.into(),
            "lastRotated" => self.last_rotated.into(),
            "rotationDays" => self.rotation_days.into(),
            "applications" => FieldValue::list(&self.applications),
            _ => FieldValue::Absent,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        Self::FIELDS.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_fields() {
        let key = CryptoKey {
            id: "k1".to_string(),
            name: "payments-signing".to_string(),
            key_type: Some(KeyType::Asymmetric),
            status: Some(KeyStatus::Rotating),
            storage: Some("hsm".to_string()),
            ..Default::default()
        };
        assert_eq!(key.field("keyType"), FieldValue::from("asymmetric"));
        assert_eq!(key.field("status"), FieldValue::from("rotating"));
        assert_eq!(key.field("rotationDays"), FieldValue::Absent);
        assert!(!key.field("applications").is_present());
    }
}
