//! Configuration module for cbom-explorer.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cbom_explorer::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .page_size(25)
//!     .quiet(true)
//!     .build();
//!
//! // Load from file
//! use cbom_explorer::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.cbom-explorer.yaml` file in your project root or
//! `~/.config/cbom-explorer/`:
//!
//! ```yaml
//! view:
//!   page_size: 25
//!   tie_breaker: id
//! output:
//!   format: json
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_COLUMN_WIDTH, DEFAULT_PAGE_SIZE, DEFAULT_TIE_BREAKER,
};
pub use types::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, ViewDefaults};
pub use validation::{ConfigError, Validatable};

pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, discover_config_file, generate_example_config,
    load_config_file, load_or_default, search_paths,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option of `.cbom-explorer.yaml` and can be
/// handed to editors for validation and completion.
pub fn generate_json_schema() -> crate::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
