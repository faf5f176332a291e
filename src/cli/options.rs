//! Options command handler.
//!
//! Prints the distinct values each filterable field takes, i.e. the entries
//! a dashboard would offer in its filter dropdowns.

use super::view::{dynamic_view_config, reference_date};
use crate::config::AppConfig;
use crate::model::{CollectionKind, DynamicRecord, Record, RecordSchema};
use crate::parsers::{load_document_at, load_dynamic_collection};
use crate::pipeline::{OutputTarget, write_output};
use crate::reports::ReportData;
use crate::view::{FilterOptions, build_filter_options};
use anyhow::{Context, Result, bail};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Arguments of the `options` subcommand.
#[derive(Debug, Clone, Default)]
pub struct OptionsRequest {
    pub path: PathBuf,
    pub kind: CollectionKind,
    /// Schemaless collection to inspect instead of `kind`
    pub collection: Option<String>,
    /// Only this field; every filterable field otherwise
    pub field: Option<String>,
    /// Emit JSON instead of one line per field
    pub json: bool,
}

/// Run the options command
pub fn run_options(request: &OptionsRequest, config: &AppConfig) -> Result<()> {
    let options = if let Some(collection) = &request.collection {
        let records = load_dynamic_collection(&request.path, collection)?;
        let refs: Vec<&DynamicRecord> = records.iter().collect();
        let filterable = dynamic_view_config(&ReportData::discover_columns(&refs)).filterable;
        collect_options(&records, &filterable, request.field.as_deref())?
    } else {
        let doc = load_document_at(&request.path, reference_date(config))?;
        match request.kind {
            CollectionKind::Certificates => typed_options(&doc.certificates, request)?,
            CollectionKind::Keys => typed_options(&doc.keys, request)?,
            CollectionKind::Assets => typed_options(&doc.assets, request)?,
            CollectionKind::Applications => typed_options(&doc.applications, request)?,
        }
    };

    let content = if request.json {
        serde_json::to_string_pretty(&options).context("failed to serialize filter options")?
    } else {
        format_options(&options)
    };
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(content.trim_end(), &target, config.behavior.quiet)
}

fn typed_options<T>(records: &[T], request: &OptionsRequest) -> Result<FilterOptions>
where
    T: Record + RecordSchema,
{
    collect_options(records, T::FILTERABLE, request.field.as_deref())
}

fn collect_options<R, F>(records: &[R], filterable: &[F], field: Option<&str>) -> Result<FilterOptions>
where
    R: Record,
    F: AsRef<str>,
{
    match field {
        Some(field) => {
            if !filterable.iter().any(|f| f.as_ref() == field) {
                let known: Vec<&str> = filterable.iter().map(AsRef::as_ref).collect();
                bail!("'{field}' is not filterable (expected one of: {})", known.join(", "));
            }
            Ok(build_filter_options(records, &[field]))
        }
        None => Ok(build_filter_options(records, filterable)),
    }
}

/// One `field: a, b, c` line per filterable field.
pub(crate) fn format_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (field, values) in options {
        let values: Vec<String> = values.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "{field} ({}): {}", values.len(), values.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;

    #[test]
    fn test_format_options() {
        let mut options = FilterOptions::new();
        options.insert(
            "status".to_string(),
            vec![FieldValue::from("active"), FieldValue::from("expired")],
        );
        options.insert("keySize".to_string(), vec![FieldValue::from(2048_i64)]);
        assert_eq!(
            format_options(&options),
            "status (2): active, expired\nkeySize (1): 2048\n"
        );
    }

    #[test]
    fn test_collect_options_rejects_unknown_field() {
        let records: Vec<DynamicRecord> = Vec::new();
        let err = collect_options(&records, &["status"], Some("issuer")).unwrap_err();
        assert!(err.to_string().contains("not filterable"));
    }
}
