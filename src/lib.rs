//! **Filter, sort and paginate Cryptography Bill of Materials (CBOM) inventories.**
//!
//! `cbom-explorer` is the tabular data view engine behind a CBOM dashboard.
//! A dashboard screen lists one collection of an inventory (certificates,
//! keys, cryptographic assets or applications) and lets the user search it,
//! narrow it with equality filters, sort it by a column and page through it.
//! This crate provides that engine as a library, together with the loaders,
//! report renderers and command-line interface built on top of it.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The CBOM record types and the [`Record`] trait the engine
//!   reads them through. Field values are dynamic [`FieldValue`]s, so the
//!   same engine serves typed collections and schemaless [`DynamicRecord`]s.
//! - **[`view`]**: The engine itself. A [`ViewController`] owns the source
//!   records and an immutable [`ViewState`]; every action produces a new
//!   state and the controller recomputes the [`DerivedView`] from it.
//! - **[`parsers`]**: Loads JSON or YAML CBOM documents and derives values
//!   such as days until certificate expiry.
//! - **[`reports`]**: Renders the visible page as a table, JSON or CSV.
//! - **[`config`]**: Application configuration loaded from YAML files.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use cbom_explorer::{Certificate, RecordSchema, ViewController, load_document};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = load_document(Path::new("inventory.cbom.json"))?;
//!
//!     let mut view = ViewController::new(doc.certificates, Certificate::view_config())?;
//!     view.set_filter("status", "expired");
//!     view.set_sort("daysUntilExpiry", None);
//!
//!     let derived = view.derived_view();
//!     println!("{}", derived.summary());
//!     for cert in &derived.visible_page {
//!         println!("{}", cert.common_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `cbom-explorer` binary wraps the library: `cbom-explorer view FILE
//! --kind certificates --filter status=expired --sort daysUntilExpiry`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;
pub mod view;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable, ViewDefaults};
pub use error::{CbomError, ErrorContext, OptionContext, Result};
pub use model::{
    Application, CbomDocument, Certificate, CertificateStatus, CollectionKind, CryptoAsset,
    CryptoKey, DynamicRecord, FieldValue, Record, RecordSchema,
};
pub use parsers::{DocumentFormat, load_document, load_document_at, parse_document_str};
pub use reports::{ReportFormat, ReportGenerator};
pub use view::{
    DerivedView, FilterValue, PageInfo, SearchField, SortDirection, SortSpec, ViewAction,
    ViewConfig, ViewController, ViewState,
};
