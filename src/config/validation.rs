//! Configuration validation for cbom-explorer.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, OutputConfig, ViewDefaults};
use crate::view::is_valid_field_name;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.view.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

/// Longest accepted debounce delay.
const MAX_DEBOUNCE_MS: u64 = 10_000;

impl Validatable for ViewDefaults {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.page_size == 0 {
            errors.push(ConfigError {
                field: "view.page_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            errors.push(ConfigError {
                field: "view.debounce_ms".to_string(),
                message: format!("{} exceeds the maximum of {MAX_DEBOUNCE_MS}", self.debounce_ms),
            });
        }
        if let Some(field) = &self.tie_breaker
            && !is_valid_field_name(field)
        {
            errors.push(ConfigError {
                field: "view.tie_breaker".to_string(),
                message: format!("'{field}' is not a valid field identifier"),
            });
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_column_width < 4 {
            errors.push(ConfigError {
                field: "output.max_column_width".to_string(),
                message: "must be at least 4".to_string(),
            });
        }
        if let Some(ref file) = self.file
            && let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError {
                field: "output.file".to_string(),
                message: format!("Parent directory does not exist: {}", parent.display()),
            });
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
