//! The CBOM document: every collection the dashboard browses.

use super::{Application, Certificate, CryptoAsset, CryptoKey, RecordSchema};
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Document-level metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetadata {
    /// Inventory name (usually the organisation or scan target)
    pub name: Option<String>,
    pub version: Option<String>,
    /// Tool that produced the inventory
    pub generator: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

/// A full Cryptography Bill of Materials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CbomDocument {
    pub metadata: DocumentMetadata,
    pub applications: Vec<Application>,
    pub certificates: Vec<Certificate>,
    pub keys: Vec<CryptoKey>,
    pub assets: Vec<CryptoAsset>,
}

/// Which collection of a document to browse.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Applications,
    #[default]
    Certificates,
    Keys,
    Assets,
}

impl CollectionKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Applications => Application::COLLECTION,
            Self::Certificates => Certificate::COLLECTION,
            Self::Keys => CryptoKey::COLLECTION,
            Self::Assets => CryptoAsset::COLLECTION,
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl CbomDocument {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
            && self.certificates.is_empty()
            && self.keys.is_empty()
            && self.assets.is_empty()
    }

    /// Fill in derived values relative to `today`.
    ///
    /// Certificates get `days_until_expiry` and a status when the document
    /// has none. Applications missing their counts get them from the other
    /// collections: a certificate or key belongs to an application when it
    /// lists the application's name or id, an asset when it shares a service.
    pub fn normalize(&mut self, today: NaiveDate) {
        for cert in &mut self.certificates {
            cert.refresh_expiry(today);
        }

        for app in &mut self.applications {
            let (name, id) = (app.name.clone(), app.id.clone());
            let owns = |apps: &[String]| apps.iter().any(|a| *a == name || *a == id);

            if app.certificate_count.is_none() {
                let count = self
                    .certificates
                    .iter()
                    .filter(|c| owns(&c.applications))
                    .count();
                app.certificate_count = Some(count as i64);
            }
            if app.key_count.is_none() {
                let count = self.keys.iter().filter(|k| owns(&k.applications)).count();
                app.key_count = Some(count as i64);
            }
            if app.algorithm_count.is_none() {
                let count = self
                    .assets
                    .iter()
                    .filter(|a| a.services.iter().any(|s| app.services.contains(s)))
                    .count();
                app.algorithm_count = Some(count as i64);
            }
        }

        tracing::debug!(
            applications = self.applications.len(),
            certificates = self.certificates.len(),
            keys = self.keys.len(),
            assets = self.assets.len(),
            "normalized CBOM document"
        );
    }
}
