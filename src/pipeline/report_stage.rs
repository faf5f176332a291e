//! Report output stage.

use super::{OutputTarget, resolve_format, should_use_color, write_output};
use crate::config::AppConfig;
use crate::model::Record;
use crate::reports::{ReportConfig, ReportData, ReportFormat, create_reporter};
use crate::view::DerivedView;
use anyhow::Result;

/// Render the visible page of `view` and write it to the configured target.
///
/// `requested` is the format given on the command line, if any.
pub fn output_view<T, C>(
    view: &DerivedView<'_, T>,
    columns: &[C],
    requested: Option<ReportFormat>,
    title: Option<String>,
    config: &AppConfig,
) -> Result<()>
where
    T: Record,
    C: AsRef<str>,
{
    let target = OutputTarget::from_option(config.output.file.clone());
    let format = resolve_format(requested, config.output.format, &target);
    let report_config = ReportConfig {
        colored: should_use_color(config.output.no_color, &target),
        max_column_width: config.output.max_column_width,
        title: title.filter(|_| format == ReportFormat::Table && !config.behavior.quiet),
    };

    let data = ReportData::from_view(view, columns);
    let report = create_reporter(format).generate(&data, &report_config)?;
    tracing::debug!(%format, rows = data.rows.len(), "rendered view page");

    // CSV rows already end in CRLF; avoid a blank trailing line on stdout.
    let report = report.trim_end_matches(['\r', '\n']);
    write_output(report, &target, config.behavior.quiet)
}
