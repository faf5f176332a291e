//! The stateful end of the view pipeline.
//!
//! [`ViewController`] owns the record collection and the current
//! [`ViewState`]. Every action goes through [`ViewState::reduce`]; the
//! controller then recomputes whatever the change invalidated, so
//! [`ViewController::derived_view`] is always a cheap read.

use super::config::ViewConfig;
use super::index::{FilterOptions, build_filter_options};
use super::paginate::PageInfo;
use super::predicate::{FilterValue, SearchField, filter_indices};
use super::sort::{SortDirection, sorted_indices};
use super::state::{ViewAction, ViewState};
use crate::error::Result;
use crate::model::{FieldValue, Record};

/// Snapshot of what a view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, T> {
    /// Every record passing the filters, in display order
    pub filtered_sorted_records: Vec<&'a T>,
    /// The records on the current page
    pub visible_page: Vec<&'a T>,
    /// Position of the current page
    pub page: PageInfo,
    /// Distinct values of each filterable field over the whole collection
    pub filter_options: &'a FilterOptions,
}

impl<T> DerivedView<'_, T> {
    /// Number of records passing the filters.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.page.total_count
    }

    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.page.total_pages
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.page.current_page
    }

    /// "Showing X-Y of N" footer text.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {} (page {}/{})",
            self.page.start_index,
            self.page.end_index,
            self.page.total_count,
            self.page.current_page,
            self.page.total_pages
        )
    }
}

/// Filter, sort and paginate a collection of records.
#[derive(Debug, Clone)]
pub struct ViewController<T> {
    source: Vec<T>,
    config: ViewConfig,
    state: ViewState,
    filter_options: FilterOptions,
    /// Indices of matching records in source order
    matched: Vec<usize>,
    /// `matched` in display order
    ordered: Vec<usize>,
    page: PageInfo,
}

impl<T: Record> ViewController<T> {
    /// Create a view over `source`.
    ///
    /// Fails with [`crate::CbomError::Config`] when `config` declares a zero
    /// page size or a field name that is not a valid identifier.
    pub fn new(source: Vec<T>, config: ViewConfig) -> Result<Self> {
        config.ensure_valid()?;
        let state = ViewState::initial(&config);
        let filter_options = build_filter_options(&source, &config.filterable);
        let page = PageInfo::compute(0, state.page);
        let mut controller = Self {
            source,
            config,
            state,
            filter_options,
            matched: Vec::new(),
            ordered: Vec::new(),
            page,
        };
        controller.refilter();
        Ok(controller)
    }

    /// Apply one action and recompute the derived outputs.
    pub fn dispatch(&mut self, action: ViewAction) {
        self.warn_on_undeclared(&action);
        let next = self.state.reduce(&action);
        let filters_changed = !next.same_filters(&self.state);
        let sort_changed = next.sort != self.state.sort;
        self.state = next;

        if filters_changed {
            self.refilter();
        } else if sort_changed {
            self.resort();
        } else {
            self.repage();
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>, field: SearchField) {
        self.dispatch(ViewAction::SetSearch {
            term: term.into(),
            field,
        });
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<FilterValue>) {
        self.dispatch(ViewAction::SetFilter {
            field: field.into(),
            value: value.into(),
        });
    }

    /// Sort by `field`. Without a direction, re-selecting the active field
    /// flips it and a new field starts ascending.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: Option<SortDirection>) {
        self.dispatch(ViewAction::SetSort {
            field: field.into(),
            direction,
        });
    }

    pub fn set_page(&mut self, page: usize) {
        self.dispatch(ViewAction::SetPage { page });
    }

    pub fn next_page(&mut self) {
        self.dispatch(ViewAction::NextPage);
    }

    pub fn prev_page(&mut self) {
        self.dispatch(ViewAction::PrevPage);
    }

    /// Change the page size and return to page 1. Zero is treated as 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.dispatch(ViewAction::SetPageSize { page_size });
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(ViewAction::ClearFilters);
    }

    /// Replace the collection, keeping the current criteria and returning
    /// to page 1.
    pub fn set_source(&mut self, source: Vec<T>) {
        self.source = source;
        self.state = self.state.reduce(&ViewAction::SetPage { page: 1 });
        self.filter_options = build_filter_options(&self.source, &self.config.filterable);
        self.refilter();
    }

    /// Current snapshot of the view.
    #[must_use]
    pub fn derived_view(&self) -> DerivedView<'_, T> {
        let filtered_sorted_records: Vec<&T> =
            self.ordered.iter().map(|&idx| &self.source[idx]).collect();
        let visible_page = filtered_sorted_records[self.page.range()].to_vec();
        DerivedView {
            filtered_sorted_records,
            visible_page,
            page: self.page,
            filter_options: &self.filter_options,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn source(&self) -> &[T] {
        &self.source
    }

    #[must_use]
    pub const fn filter_options(&self) -> &FilterOptions {
        &self.filter_options
    }

    /// Option domain of one filterable field.
    #[must_use]
    pub fn options_for(&self, field: &str) -> Option<&[FieldValue]> {
        self.filter_options.get(field).map(Vec::as_slice)
    }

    #[must_use]
    pub const fn page_info(&self) -> PageInfo {
        self.page
    }

    fn refilter(&mut self) {
        let set = self.state.filter_set(&self.config.searchable);
        self.matched = filter_indices(&self.source, &set);
        self.resort();
    }

    fn resort(&mut self) {
        self.ordered = match &self.state.sort {
            Some(sort) => sorted_indices(
                &self.source,
                &self.matched,
                sort,
                self.config.tie_breaker.as_deref(),
            ),
            None => self.matched.clone(),
        };
        self.repage();
    }

    fn repage(&mut self) {
        let len = self.ordered.len();
        let next = self.state.clamped(len);
        if next.page != self.state.page {
            tracing::debug!(
                requested = self.state.page.current_page,
                clamped = next.page.current_page,
                "page out of range"
            );
            self.state = next;
        }
        self.page = PageInfo::compute(len, self.state.page);
        tracing::debug!(
            source = self.source.len(),
            matched = len,
            page = self.page.current_page,
            pages = self.page.total_pages,
            "view recomputed"
        );
    }

    fn warn_on_undeclared(&self, action: &ViewAction) {
        let (field, declared) = match action {
            ViewAction::SetSort { field, .. } => (field, &self.config.sortable),
            ViewAction::SetFilter { field, .. } => (field, &self.config.filterable),
            _ => return,
        };
        if !declared.is_empty() && !declared.contains(field) {
            tracing::warn!(field = %field, "field is not declared for this view");
        }
    }
}
