//! Report type definitions.

use crate::config::DEFAULT_MAX_COLUMN_WIDTH;
use crate::model::{FieldValue, Record};
use crate::view::{DerivedView, PageInfo};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Aligned text table for terminals
    #[default]
    Table,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
}

impl ReportFormat {
    /// Format implied by an output file extension.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "txt" => Some(Self::Table),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Rendering options shared by all reporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Emit ANSI colors (table only)
    pub colored: bool,
    /// Widest a table cell may be, in terminal cells
    pub max_column_width: usize,
    /// Optional heading printed above a table
    pub title: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            colored: false,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            title: None,
        }
    }
}

/// The visible page of a view, flattened into named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<FieldValue>>,
    pub page: PageInfo,
}

impl ReportData {
    /// Extract `columns` from every record on the visible page.
    pub fn from_view<T, C>(view: &DerivedView<'_, T>, columns: &[C]) -> Self
    where
        T: Record,
        C: AsRef<str>,
    {
        let rows = view
            .visible_page
            .iter()
            .map(|record| columns.iter().map(|c| record.field(c.as_ref())).collect())
            .collect();
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows,
            page: view.page,
        }
    }

    /// Columns for records without a fixed schema: the fields of the first
    /// record, followed by any field a later record adds.
    #[must_use]
    pub fn discover_columns<T: Record>(records: &[&T]) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for name in record.field_names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }
        columns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
