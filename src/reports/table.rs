//! Aligned text table for terminals.

use super::{ReportConfig, ReportData, ReportFormat, ReportGenerator};
use crate::error::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Placeholder shown for absent values.
const EMPTY_CELL: &str = "-";

fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Table reporter
pub struct TableReporter;

impl TableReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate(&self, data: &ReportData, config: &ReportConfig) -> Result<String> {
        let mut lines = Vec::new();
        if let Some(title) = &config.title {
            lines.push(ansi_color(title, "bold", config.colored));
            lines.push(String::new());
        }

        if data.is_empty() {
            lines.push("No records match.".to_string());
        } else {
            let cells: Vec<Vec<String>> = data
                .rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|value| {
                            let text = value.to_string();
                            let text = if text.trim().is_empty() { EMPTY_CELL.to_string() } else { text };
                            truncate_width(&text, config.max_column_width)
                        })
                        .collect()
                })
                .collect();

            let widths: Vec<usize> = data
                .columns
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    cells
                        .iter()
                        .map(|row| row[i].width())
                        .chain(std::iter::once(header.width()))
                        .max()
                        .unwrap_or(0)
                        .min(config.max_column_width.max(header.width()))
                })
                .collect();

            let header = data
                .columns
                .iter()
                .zip(&widths)
                .map(|(h, w)| ansi_color(&pad(h, *w), "bold", config.colored))
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(header.trim_end().to_string());
            lines.push(
                widths
                    .iter()
                    .map(|w| "─".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("  "),
            );

            for row in &cells {
                let line = row
                    .iter()
                    .zip(&widths)
                    .map(|(cell, w)| {
                        let padded = pad(cell, *w);
                        match severity_color(cell) {
                            Some(color) => ansi_color(&padded, color, config.colored),
                            None => padded,
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("  ");
                lines.push(line.trim_end().to_string());
            }
        }

        lines.push(String::new());
        let page = &data.page;
        lines.push(ansi_color(
            &format!(
                "Showing {}-{} of {} (page {}/{})",
                page.start_index, page.end_index, page.total_count, page.current_page, page.total_pages
            ),
            "dim",
            config.colored,
        ));
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}

/// Highlight for cells that flag a problem.
fn severity_color(cell: &str) -> Option<&'static str> {
    match cell {
        "expired" | "revoked" | "compromised" | "critical" => Some("red"),
        "expiring" | "rotating" | "high" => Some("yellow"),
        _ => None,
    }
}

/// Right-pad `s` with spaces to `width` terminal cells.
fn pad(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

/// Cut `s` to at most `max_width` terminal cells, marking the cut with `…`.
fn truncate_width(s: &str, max_width: usize) -> String {
    let s = s.replace(['\n', '\r', '\t'], " ");
    if s.width() <= max_width {
        return s;
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
