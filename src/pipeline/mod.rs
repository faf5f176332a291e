//! Pipeline orchestration for view operations.
//!
//! Shared load → view → report plumbing used by the CLI command handlers.

mod output;
mod report_stage;

pub use output::{OutputTarget, resolve_format, should_use_color, write_output};
pub use report_stage::output_view;

/// Exit codes for scripting
pub mod exit_codes {
    /// Success - at least one record matched
    pub const SUCCESS: i32 = 0;
    /// No record matched the search and filters
    pub const NO_MATCHES: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
