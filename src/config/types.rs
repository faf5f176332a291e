//! Configuration types for cbom-explorer.

use crate::model::CollectionKind;
use crate::reports::ReportFormat;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration loaded from config files and CLI args.
///
/// Values from a config file form the base layer; CLI arguments are merged
/// on top with [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for tabular views
    pub view: ViewDefaults,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the number of records per page.
    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.config.view.page_size = page_size;
        self
    }

    /// Set the search debounce delay in milliseconds.
    pub const fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.view.debounce_ms = ms;
        self
    }

    /// Set the secondary sort field.
    pub fn tie_breaker(mut self, field: Option<String>) -> Self {
        self.config.view.tie_breaker = field;
        self
    }

    pub const fn default_kind(mut self, kind: CollectionKind) -> Self {
        self.config.view.default_kind = kind;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Compute certificate expiry against a fixed date instead of today.
    pub const fn reference_date(mut self, date: Option<NaiveDate>) -> Self {
        self.config.behavior.reference_date = date;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Defaults applied to every tabular view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ViewDefaults {
    /// Records per page
    pub page_size: usize,
    /// Delay before search input is applied, in milliseconds. Read by
    /// interactive front ends through `Debouncer::from_defaults`.
    pub debounce_ms: u64,
    /// Secondary sort field for records with equal sort keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_breaker: Option<String>,
    /// Collection shown when none is given
    pub default_kind: CollectionKind,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Widest a table column may grow before it is truncated
    pub max_column_width: usize,
}

/// Behavior flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit with code 1 when no record matches
    pub fail_on_empty: bool,
    /// Date certificate expiry is computed against (default: today)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}
