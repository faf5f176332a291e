//! View command handler.
//!
//! Implements the `view` subcommand: load a document, run one collection
//! through the view engine and print the requested page.

use crate::config::AppConfig;
use crate::model::{CbomDocument, CollectionKind, DynamicRecord, Record, RecordSchema};
use crate::parsers::{load_document_at, load_dynamic_collection};
use crate::pipeline::{exit_codes, output_view};
use crate::reports::{ReportData, ReportFormat};
use crate::view::{
    FilterValue, SearchField, SortDirection, ViewConfig, ViewController, is_valid_field_name,
};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Everything the `view` subcommand was asked to do.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    /// Document to load
    pub path: PathBuf,
    /// Typed collection to browse
    pub kind: CollectionKind,
    /// Browse this top-level array as schemaless records instead of `kind`
    pub collection: Option<String>,
    pub search: Option<String>,
    /// Field to restrict the search to; `None` or "all" searches every field
    pub search_field: Option<String>,
    /// Raw `field=value` filter arguments
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub descending: bool,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    /// Format given on the command line; falls back to config
    pub format: Option<ReportFormat>,
}

/// Run the view command
pub fn run_view(request: &ViewRequest, config: &AppConfig) -> Result<i32> {
    let filters = request
        .filters
        .iter()
        .map(|arg| parse_filter_arg(arg))
        .collect::<Result<Vec<_>>>()?;

    if let Some(collection) = &request.collection {
        let records = load_dynamic_collection(&request.path, collection)?;
        let refs: Vec<&DynamicRecord> = records.iter().collect();
        let columns = ReportData::discover_columns(&refs);
        let view_config = dynamic_view_config(&columns).with_defaults(&config.view);
        let title = view_title(collection, &request.path);
        return render(records, view_config, &columns, &filters, request, title, config);
    }

    let document = load_document_at(&request.path, reference_date(config))?;
    if document.is_empty() {
        tracing::warn!(path = %request.path.display(), "document has no records in any collection");
    }
    let title = view_title(request.kind.name(), &request.path);
    dispatch_kind(document, request, &filters, title, config)
}

/// Split a `field=value` argument. The value `all` clears the filter.
pub fn parse_filter_arg(arg: &str) -> Result<(String, FilterValue)> {
    let Some((field, value)) = arg.split_once('=') else {
        bail!("invalid filter '{arg}': expected FIELD=VALUE");
    };
    let field = field.trim();
    if !is_valid_field_name(field) {
        bail!("invalid filter '{arg}': '{field}' is not a field name");
    }
    Ok((field.to_string(), FilterValue::parse(value.trim())))
}

pub(crate) fn reference_date(config: &AppConfig) -> NaiveDate {
    config
        .behavior
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Every discovered column that is a usable identifier becomes filterable
/// and sortable.
pub(crate) fn dynamic_view_config(columns: &[String]) -> ViewConfig {
    let usable: Vec<&str> = columns
        .iter()
        .map(String::as_str)
        .filter(|c| is_valid_field_name(c))
        .collect();
    ViewConfig::builder()
        .filterable(usable.iter().copied())
        .sortable(usable.iter().copied())
        .build()
}

fn dispatch_kind(
    document: CbomDocument,
    request: &ViewRequest,
    filters: &[(String, FilterValue)],
    title: String,
    config: &AppConfig,
) -> Result<i32> {
    match request.kind {
        CollectionKind::Certificates => {
            render_typed(document.certificates, filters, request, title, config)
        }
        CollectionKind::Keys => render_typed(document.keys, filters, request, title, config),
        CollectionKind::Assets => render_typed(document.assets, filters, request, title, config),
        CollectionKind::Applications => {
            render_typed(document.applications, filters, request, title, config)
        }
    }
}

fn render_typed<T>(
    records: Vec<T>,
    filters: &[(String, FilterValue)],
    request: &ViewRequest,
    title: String,
    config: &AppConfig,
) -> Result<i32>
where
    T: Record + RecordSchema,
{
    let view_config = T::view_config().with_defaults(&config.view);
    render(records, view_config, T::FIELDS, filters, request, title, config)
}

#[allow(clippy::too_many_arguments)]
fn render<T, C>(
    records: Vec<T>,
    view_config: ViewConfig,
    columns: &[C],
    filters: &[(String, FilterValue)],
    request: &ViewRequest,
    title: String,
    config: &AppConfig,
) -> Result<i32>
where
    T: Record,
    C: AsRef<str>,
{
    let mut controller = ViewController::new(records, view_config)?;
    apply_request(&mut controller, filters, request);

    let view = controller.derived_view();
    tracing::debug!("{}", view.summary());
    output_view(&view, columns, request.format, Some(title), config)
        .context("failed to write view report")?;

    if view.total_count() == 0 && config.behavior.fail_on_empty {
        Ok(exit_codes::NO_MATCHES)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Replay the command-line options as controller actions.
///
/// Page size goes before the page number because changing it resets the
/// view to the first page.
pub(crate) fn apply_request<T: Record>(
    controller: &mut ViewController<T>,
    filters: &[(String, FilterValue)],
    request: &ViewRequest,
) {
    if let Some(term) = &request.search {
        let field = request
            .search_field
            .as_deref()
            .map_or(SearchField::All, SearchField::parse);
        controller.set_search(term.as_str(), field);
    }
    for (field, value) in filters {
        controller.set_filter(field.as_str(), value.clone());
    }
    if let Some(field) = &request.sort {
        let direction = if request.descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        controller.set_sort(field.as_str(), Some(direction));
    }
    if let Some(page_size) = request.page_size {
        controller.set_page_size(page_size);
    }
    if let Some(page) = request.page {
        controller.set_page(page);
    }
}

fn view_title(collection: &str, path: &Path) -> String {
    let file = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    format!("{collection} in {file}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_arg() {
        let (field, value) = parse_filter_arg("status=expired").unwrap();
        assert_eq!(field, "status");
        assert_eq!(value, FilterValue::from("expired"));

        let (_, value) = parse_filter_arg("status=all").unwrap();
        assert_eq!(value, FilterValue::All);

        assert!(parse_filter_arg("status").is_err());
        assert!(parse_filter_arg("bad field=x").is_err());
    }

    #[test]
    fn test_dynamic_view_config_skips_unusable_names() {
        let columns = vec!["id".to_string(), "key-size".to_string(), "algorithm".to_string()];
        let config = dynamic_view_config(&columns);
        assert_eq!(config.filterable, vec!["id", "algorithm"]);
        assert_eq!(config.sortable, vec!["id", "algorithm"]);
        assert!(config.ensure_valid().is_ok());
    }

    #[test]
    fn test_view_title() {
        assert_eq!(
            view_title("certificates", Path::new("/data/prod.cbom.json")),
            "certificates in prod.cbom.json"
        );
    }
}
