//! Report generation for view pages.
//!
//! Supports multiple output formats:
//! - Table (aligned text for terminals)
//! - JSON (page metadata plus records)
//! - CSV (spreadsheet import)

mod csv;
mod json;
mod table;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use table::TableReporter;
pub use types::{ReportConfig, ReportData, ReportFormat};

use crate::error::Result;

/// Trait for report generators
pub trait ReportGenerator {
    /// Render one page of a view.
    fn generate(&self, data: &ReportData, config: &ReportConfig) -> Result<String>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Table => Box::new(TableReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
    }
}
