//! CSV report generator.
//!
//! One header row plus one row per visible record, quoted per RFC 4180.
//! List values are joined with `", "` inside a single quoted cell.

use super::{ReportConfig, ReportData, ReportFormat, ReportGenerator};
use crate::error::Result;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, data: &ReportData, _config: &ReportConfig) -> Result<String> {
        let mut content = String::new();
        write_record(&mut content, data.columns.iter().map(String::as_str));
        for row in &data.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            write_record(&mut content, cells.iter().map(String::as_str));
        }
        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

fn write_record<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let line = cells.map(escape_csv).collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
