//! JSON report generator.

use super::{ReportConfig, ReportData, ReportFormat, ReportGenerator};
use crate::error::{CbomError, ReportErrorKind, Result};
use crate::model::FieldValue;
use indexmap::IndexMap;
use serde::Serialize;

/// JSON reporter
pub struct JsonReporter {
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Single-line output, one document per line.
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonPage<'a> {
    total_count: usize,
    current_page: usize,
    total_pages: usize,
    start_index: usize,
    end_index: usize,
    records: Vec<IndexMap<&'a str, &'a FieldValue>>,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, data: &ReportData, _config: &ReportConfig) -> Result<String> {
        let records = data
            .rows
            .iter()
            .map(|row| {
                data.columns
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter())
                    .collect()
            })
            .collect();
        let page = JsonPage {
            total_count: data.page.total_count,
            current_page: data.page.current_page,
            total_pages: data.page.total_pages,
            start_index: data.page.start_index,
            end_index: data.page.end_index,
            records,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&page)
        } else {
            serde_json::to_string(&page)
        };
        rendered.map_err(|e| {
            CbomError::report(
                "rendering view page",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
