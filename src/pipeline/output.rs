//! Output handling for view reports.
//!
//! Provides utilities for picking the output format and writing reports.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Pick the effective format.
///
/// An explicitly requested format wins. Otherwise a file target with a
/// known extension decides, and the configured default applies last.
#[must_use]
pub fn resolve_format(
    requested: Option<ReportFormat>,
    configured: ReportFormat,
    target: &OutputTarget,
) -> ReportFormat {
    requested
        .or_else(|| match target {
            OutputTarget::File(path) => ReportFormat::from_extension(path),
            OutputTarget::Stdout => None,
        })
        .unwrap_or(configured)
}

/// Determine if color should be used based on flags, environment and target
#[must_use]
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && target.is_terminal()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_target_from_option() {
        assert_eq!(OutputTarget::from_option(None), OutputTarget::Stdout);
        let path = PathBuf::from("/tmp/view.json");
        assert_eq!(
            OutputTarget::from_option(Some(path.clone())),
            OutputTarget::File(path)
        );
    }

    #[test]
    fn test_resolve_format() {
        let csv_file = OutputTarget::File(PathBuf::from("page.csv"));
        assert_eq!(
            resolve_format(None, ReportFormat::Table, &csv_file),
            ReportFormat::Csv
        );
        assert_eq!(
            resolve_format(Some(ReportFormat::Json), ReportFormat::Table, &csv_file),
            ReportFormat::Json
        );
        assert_eq!(
            resolve_format(None, ReportFormat::Json, &OutputTarget::Stdout),
            ReportFormat::Json
        );
    }

    #[test]
    fn test_no_color_for_files() {
        let target = OutputTarget::File(PathBuf::from("out.txt"));
        assert!(!should_use_color(false, &target));
        assert!(!should_use_color(true, &OutputTarget::Stdout));
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("page.csv");
        write_output("id\r\n", &OutputTarget::File(path.clone()), true).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "id\r\n");
    }
}
