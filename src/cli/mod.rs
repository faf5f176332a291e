//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod options;
mod view;

pub use options::{OptionsRequest, run_options};
pub use view::{ViewRequest, parse_filter_arg, run_view};

// Re-export config types used by handlers
pub use crate::config::AppConfig;
