//! Record model for Cryptography Bill of Materials inventories.
//!
//! The view engine only sees records through the [`Record`] trait and the
//! dynamic [`FieldValue`] type. The concrete CBOM types here implement it for
//! the collections a dashboard browses: applications, certificates, keys and
//! cryptographic assets. [`DynamicRecord`] covers documents with no fixed
//! schema.
//!
//! ```ignore
//! let cert = Certificate { issuer: Some("DigiCert".into()), ..Default::default() };
//! assert_eq!(cert.field("issuer"), FieldValue::from("DigiCert"));
//! ```

mod application;
mod asset;
mod certificate;
mod document;
mod dynamic;
mod key;
mod record;
mod value;

pub use application::Application;
pub use asset::{AssetType, CryptoAsset, RiskLevel};
pub use certificate::{Certificate, CertificateStatus, EXPIRING_WINDOW_DAYS};
pub use document::{CbomDocument, CollectionKind, DocumentMetadata};
pub use dynamic::DynamicRecord;
pub use key::{CryptoKey, KeyStatus, KeyType};
pub use record::{Record, RecordSchema};
pub use value::FieldValue;
