//! Cryptographic algorithms, protocols and libraries found in services.

use super::{FieldValue, Record, RecordSchema};
use serde::{Deserialize, Serialize};

/// What kind of cryptographic building block an asset is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Algorithm,
    Protocol,
    Library,
}

impl AssetType {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Algorithm => "algorithm",
            Self::Protocol => "protocol",
            Self::Library => "library",
        }
    }
}

/// Risk rating assigned to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// An algorithm, protocol or library entry of the bill of materials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CryptoAsset {
    pub id: String,
    pub name: String,
    pub asset_type: Option<AssetType>,
    /// Cryptographic primitive ("signature", "block-cipher", "hash", ...)
    pub primitive: Option<String>,
    pub version: Option<String>,
    pub quantum_safe: Option<bool>,
    pub risk: Option<RiskLevel>,
    /// Number of places the asset was observed
    pub occurrences: Option<i64>,
    pub services: Vec<String>,
}

impl RecordSchema for CryptoAsset {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "assetType",
        "primitive",
        "version",
        "quantumSafe",
        "risk",
        "occurrences",
        "services",
    ];
    const COLLECTION: &'static str = "assets";
    const FILTERABLE: &'static [&'static str] =
        &["assetType", "primitive", "quantumSafe", "risk", "services"];
    const SORTABLE: &'static [&'static str] =
        &["name", "assetType", "primitive", "risk", "occurrences"];
    const DEFAULT_SORT: Option<&'static str> = Some("name");
}

impl Record for CryptoAsset {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "assetType" => self.asset_type.map(|t| t.label()).into(),
            "primitive" => self.primitive.as_deref().into(),
            "version" => self.version.as_deref().into(),
            "quantumSafe" => self.quantum_safe.into(),
            "risk" => self.risk.map(|r| r.label()).into(),
            "occurrences" => self.occurrences.into(),
            "services" => FieldValue::list(&self.services),
            _ => FieldValue::Absent,
        }
    }

    fn field_names(&self) -> Vec<&str> {
        Self::FIELDS.to_vec()
    }
}
