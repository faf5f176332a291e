//! Default values for cbom-explorer configuration.

use super::types::{BehaviorConfig, OutputConfig, ViewDefaults};
use crate::model::CollectionKind;
use crate::reports::ReportFormat;

/// Records per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field used to order records with equal sort keys.
pub const DEFAULT_TIE_BREAKER: &str = "id";

/// Widest table column, in terminal cells.
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 40;

pub use crate::view::DEFAULT_DEBOUNCE_MS;

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            tie_breaker: Some(DEFAULT_TIE_BREAKER.to_string()),
            default_kind: CollectionKind::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Table,
            file: None,
            no_color: false,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            fail_on_empty: true,
            reference_date: None,
        }
    }
}
