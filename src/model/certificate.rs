//! X.509 certificates tracked by the inventory.

use super::{FieldValue, Record, RecordSchema};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days before expiry at which a certificate counts as "expiring".
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

/// Lifecycle status of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Valid,
    Expiring,
    Expired,
    Revoked,
}

impl CertificateStatus {
    /// Machine-friendly label, also used as the filter value.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expiring => "expiring",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }

    /// Classify by remaining validity in days.
    #[must_use]
    pub const fn from_days_until_expiry(days: i64) -> Self {
        if days < 0 {
            Self::Expired
        } else if days <= EXPIRING_WINDOW_DAYS {
            Self::Expiring
        } else {
            Self::Valid
        }
    }
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A certificate discovered on one or more applications.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub id: String,
    pub common_name: String,
    pub issuer: Option<String>,
    pub subject: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<CertificateStatus>,
    /// Public key algorithm (e.g. "RSA", "ECDSA")
    pub key_algorithm: Option<String>,
    /// Key size in bits
    pub key_size: Option<u32>,
    pub signature_algorithm: Option<String>,
    pub not_before: Option<NaiveDate>,
    pub not_after: Option<NaiveDate>,
    /// Days until `not_after` (negative = already expired)
    pub days_until_expiry: Option<i64>,
    /// Applications presenting this certificate
    pub applications: Vec<String>,
}

impl Certificate {
    /// Recompute `days_until_expiry` against `today` and fill in a missing status.
    ///
    /// An explicit status from the source document is never overwritten.
    pub fn refresh_expiry(&mut self, today: NaiveDate) {
        if let Some(not_after) = self.not_after {
            self.days_until_expiry = Some((not_after - today).num_days());
        }
        if self.status.is_none() {
            self.status = self
                .days_until_expiry
                .map(CertificateStatus::from_days_until_expiry);
        }
    }
}

impl RecordSchema for Certificate {
    const FIELDS: &'static [&'static str] = &[
        "id",
        "commonName",
        "issuer",
        "subject",
        "serialNumber",
        "status",
        "keyAlgorithm",
        "keySize",
        "signatureAlgorithm",
        "notBefore",
        "notAfter",
        "daysUntilExpiry",
        "applications",
    ];
    const COLLECTION: &'static str = "certificates";
    const FILTERABLE: &'static [&'static str] = &[
        "status",
        "issuer",
        "keyAlgorithm",
        "signatureAlgorithm",
        "applications",
    ];
    const SORTABLE: &'static [&'static str] = &[
        "commonName",
        "issuer",
        "status",
        "keySize",
        "notAfter",
        "daysUntilExpiry",
    ];
    const DEFAULT_SORT: Option<&'static str> = Some("daysUntilExpiry");
}

impl Record for Certificate {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => (&self.id).into(),
            "commonName" => (&self.common_name).into(),
            "issuer" => self.issuer.as_deref().into(),
            "subject" => self.subject.as_deref().into(),
            "serialNumber" => self.serial_number.as_deref().into(),
            "status" => self.status.map(|s| s.label()).into(),
            "keyAlgorithm" => self.key_algorithm.as_deref().into(),
            "keySize" => self.key_size.into(),
            "signatureAlgorithm" => self.signature_algorithm.as_deref().into(),
            "notBefore" => self.not_before.into(),
            "notAfter" => self.not_after.into(),
            "daysUntilExpiry" => self.days_until_expiry.into(),
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_refresh_expiry_derives_status() {
        let today = date(2024, 6, 1);
        let mut cert = Certificate {
            id: "c1".to_string(),
            not_after: Some(date(2024, 5, 22)),
            ..Default::default()
        };
        cert.refresh_expiry(today);
        assert_eq!(cert.days_until_expiry, Some(-10));
        assert_eq!(cert.status, Some(CertificateStatus::Expired));

        let mut soon = Certificate {
            not_after: Some(date(2024, 6, 15)),
            ..Default::default()
        };
        soon.refresh_expiry(today);
        assert_eq!(soon.status, Some(CertificateStatus::Expiring));
    }

    #[test]
    fn test_refresh_expiry_keeps_explicit_status() {
        let mut cert = Certificate {
            status: Some(CertificateStatus::Revoked),
            not_after: Some(date(2030, 1, 1)),
            ..Default::default()
        };
        cert.refresh_expiry(date(2024, 1, 1));
        assert_eq!(cert.status, Some(CertificateStatus::Revoked));
        assert!(cert.days_until_expiry.is_some_and(|d| d > 0));
    }

    #[test]
    fn test_field_access() {
        let cert = Certificate {
            id: "c1".to_string(),
            common_name: "api.example.com".to_string(),
            issuer: Some("DigiCert Global G2".to_string()),
            key_size: Some(2048),
            not_after: Some(date(2025, 3, 9)),
            applications: vec!["payments".to_string()],
            ..Default::default()
        };
        assert_eq!(cert.field("issuer"), FieldValue::from("DigiCert Global G2"));
        assert_eq!(cert.field("keySize"), FieldValue::Integer(2048));
        assert_eq!(cert.field("notAfter"), FieldValue::from("2025-03-09"));
        assert_eq!(cert.field("subject"), FieldValue::Absent);
        assert_eq!(cert.field("nope"), FieldValue::Absent);
        assert!(cert.field("applications").matches_exact(&"payments".into()));
        assert_eq!(cert.field_names().len(), Certificate::FIELDS.len());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let cert: Certificate = serde_json::from_str(
            r#"{"id":"c9","commonName":"mail.example.com","status":"expired","keySize":4096,"notAfter":"2024-01-31"}"#,
        )
        .expect("valid certificate");
        assert_eq!(cert.status, Some(CertificateStatus::Expired));
        assert_eq!(cert.key_size, Some(4096));
        assert!(cert.applications.is_empty());
    }
}
