//! CBOM document loading.
//!
//! Documents are JSON or YAML objects with optional `applications`,
//! `certificates`, `keys` and `assets` arrays and an optional `metadata`
//! object. The format is taken from the file extension when it is a known
//! one, otherwise it is sniffed from the content.
//!
//! ## Usage
//!
//! ```no_run
//! use cbom_explorer::parsers::load_document;
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("inventory.cbom.json")).unwrap();
//! println!("{} certificates", doc.certificates.len());
//! ```

mod detection;

pub use detection::DocumentFormat;

use crate::error::{CbomError, ErrorContext, OptionContext, ParseErrorKind, Result};
use crate::model::{CbomDocument, DynamicRecord};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Maximum document size (256 MB).
const MAX_DOCUMENT_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Load and normalize a document, computing expiry against today.
pub fn load_document(path: &Path) -> Result<CbomDocument> {
    load_document_at(path, chrono::Local::now().date_naive())
}

/// Load and normalize a document, computing expiry against `today`.
pub fn load_document_at(path: &Path, today: NaiveDate) -> Result<CbomDocument> {
    let content = read_document(path)?;
    let format = DocumentFormat::detect(Some(path), &content)
        .ok_or_else(|| CbomError::unknown_format(path.display().to_string()))?;
    let mut doc = parse_document_str(&content, format)
        .with_context(|| format!("loading {}", path.display()))?;
    doc.normalize(today);
    tracing::debug!(path = %path.display(), %format, "loaded CBOM document");
    Ok(doc)
}

/// Parse a document without normalizing it.
pub fn parse_document_str(content: &str, format: DocumentFormat) -> Result<CbomDocument> {
    deserialize(content, format)
}

/// Load an arbitrary top-level array of objects as schemaless records.
///
/// Key order of each object is kept, so columns follow the document.
pub fn load_dynamic_collection(path: &Path, collection: &str) -> Result<Vec<DynamicRecord>> {
    let content = read_document(path)?;
    let format = DocumentFormat::detect(Some(path), &content)
        .ok_or_else(|| CbomError::unknown_format(path.display().to_string()))?;
    parse_dynamic_collection(&content, format, collection)
        .with_context(|| format!("loading {}", path.display()))
}

/// Parse one named top-level array of objects.
pub fn parse_dynamic_collection(
    content: &str,
    format: DocumentFormat,
    collection: &str,
) -> Result<Vec<DynamicRecord>> {
    let mut sections: IndexMap<String, Section> = deserialize(content, format)?;
    let found = sections.keys().cloned().collect::<Vec<_>>().join(", ");
    let section = sections
        .swap_remove(collection)
        .context_none(format!("document has no collection '{collection}' (found: {found})"))?;
    match section {
        Section::Records(records) => Ok(records),
        Section::Other(_) => Err(CbomError::parse(
            format!("collection '{collection}'"),
            ParseErrorKind::InvalidValue {
                field: collection.to_string(),
                message: "expected an array of objects".to_string(),
            },
        )),
    }
}

/// A top-level entry of a document.
#[derive(Deserialize)]
#[serde(untagged)]
enum Section {
    Records(Vec<DynamicRecord>),
    Other(serde::de::IgnoredAny),
}

fn read_document(path: &Path) -> Result<String> {
    let metadata = std::fs::metadata(path).map_err(|e| CbomError::io(path, e))?;
    if metadata.len() > MAX_DOCUMENT_FILE_SIZE {
        return Err(CbomError::validation(format!(
            "{} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_DOCUMENT_FILE_SIZE / (1024 * 1024),
        )));
    }
    std::fs::read_to_string(path).map_err(|e| CbomError::io(path, e))
}

fn deserialize<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    let content = content.trim_start_matches('\u{feff}');
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
    }
}
