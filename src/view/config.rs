//! Declarative configuration of a tabular view.

use super::sort::SortSpec;
use crate::config::{ConfigError, DEFAULT_PAGE_SIZE, Validatable, ViewDefaults};
use crate::error::{CbomError, Result};
use crate::model::RecordSchema;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FIELD_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));

/// Whether `name` is usable as a field identifier.
#[must_use]
pub fn is_valid_field_name(name: &str) -> bool {
    FIELD_IDENT.is_match(name)
}

/// Which fields a view filters, sorts and searches on, and how it pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Fields offered as equality filters
    pub filterable: Vec<String>,
    /// Fields the user may sort by
    pub sortable: Vec<String>,
    /// Fields covered by an "all fields" search; empty means every field
    pub searchable: Vec<String>,
    /// Records per page
    pub page_size: usize,
    /// Sort applied before the user picks one
    pub default_sort: Option<SortSpec>,
    /// Secondary sort key for records with equal primary keys
    pub tie_breaker: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            filterable: Vec::new(),
            sortable: Vec::new(),
            searchable: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: None,
            tie_breaker: None,
        }
    }
}

impl ViewConfig {
    pub fn builder() -> ViewConfigBuilder {
        ViewConfigBuilder::default()
    }

    /// Default view for a record type with a fixed schema.
    #[must_use]
    pub fn for_schema<T: RecordSchema>() -> Self {
        let mut builder = Self::builder()
            .filterable(T::FILTERABLE.iter().copied())
            .sortable(T::SORTABLE.iter().copied());
        if let Some(field) = T::DEFAULT_SORT {
            builder = builder.default_sort(SortSpec::asc(field));
        }
        if T::FIELDS.contains(&"id") {
            builder = builder.tie_breaker("id");
        }
        builder.build()
    }

    /// Take page size and tie-breaker from the application defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: &ViewDefaults) -> Self {
        self.page_size = defaults.page_size;
        self.tie_breaker.clone_from(&defaults.tie_breaker);
        self
    }

    /// Validate and convert the problems into a single configuration error.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(CbomError::config(format!("invalid view configuration: {message}")))
    }
}

impl Validatable for ViewConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.page_size == 0 {
            errors.push(ConfigError {
                field: "view.page_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let lists = [
            ("view.filterable", &self.filterable),
            ("view.sortable", &self.sortable),
            ("view.searchable", &self.searchable),
        ];
        for (field, names) in lists {
            for name in names.iter().filter(|n| !is_valid_field_name(n)) {
                errors.push(invalid_field(field, name));
            }
        }

        if let Some(sort) = &self.default_sort
            && !is_valid_field_name(&sort.field)
        {
            errors.push(invalid_field("view.default_sort", &sort.field));
        }
        if let Some(tie) = &self.tie_breaker
            && !is_valid_field_name(tie)
        {
            errors.push(invalid_field("view.tie_breaker", tie));
        }
        errors
    }
}

fn invalid_field(field: &str, name: &str) -> ConfigError {
    ConfigError {
        field: field.to_string(),
        message: format!("'{name}' is not a valid field identifier"),
    }
}

/// Builder for [`ViewConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct ViewConfigBuilder {
    config: ViewConfig,
}

impl ViewConfigBuilder {
    pub fn filterable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.filterable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sortable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.sortable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.searchable = fields.into_iter().map(Into::into).collect();
        self
    }

    pub const fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.config.default_sort = Some(sort);
        self
    }

    pub fn tie_breaker(mut self, field: impl Into<String>) -> Self {
        self.config.tie_breaker = Some(field.into());
        self
    }

    pub fn no_tie_breaker(mut self) -> Self {
        self.config.tie_breaker = None;
        self
    }

    #[must_use]
    pub fn build(self) -> ViewConfig {
        self.config
    }
}
