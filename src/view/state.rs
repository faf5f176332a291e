//! View state and the reducer that moves it between user actions.

use super::config::ViewConfig;
use super::paginate::PageSpec;
use super::predicate::{FilterMap, FilterSet, FilterValue, SearchField, SearchSpec};
use super::sort::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};

/// Everything the user has chosen about a view.
///
/// The state is never mutated in place: [`ViewState::reduce`] returns the
/// next state for an action and leaves the current one untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub search: SearchSpec,
    pub filters: FilterMap,
    pub sort: Option<SortSpec>,
    pub page: PageSpec,
}

/// A user action on a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewAction {
    SetSearch { term: String, field: SearchField },
    /// Setting a filter to [`FilterValue::All`] removes it
    SetFilter { field: String, value: FilterValue },
    /// Without a direction the active field toggles, a new field starts ascending
    SetSort {
        field: String,
        direction: Option<SortDirection>,
    },
    SetPage { page: usize },
    NextPage,
    PrevPage,
    SetPageSize { page_size: usize },
    ClearFilters,
}

impl ViewAction {
    /// Whether the action can change which records pass the filters.
    #[must_use]
    pub const fn touches_filters(&self) -> bool {
        matches!(
            self,
            Self::SetSearch { .. } | Self::SetFilter { .. } | Self::ClearFilters
        )
    }
}

impl ViewState {
    /// Initial state for a view: no search or filters, the configured
    /// default sort and page 1.
    #[must_use]
    pub fn initial(config: &ViewConfig) -> Self {
        Self {
            search: SearchSpec::default(),
            filters: FilterMap::new(),
            sort: config.default_sort.clone(),
            page: PageSpec::first(config.page_size),
        }
    }

    /// The filter criteria of this state, searching `searchable`.
    #[must_use]
    pub fn filter_set<'a>(&'a self, searchable: &'a [String]) -> FilterSet<'a> {
        FilterSet {
            search: &self.search,
            filters: &self.filters,
            searchable,
        }
    }

    /// Whether two states select the same records, ignoring sort and page.
    #[must_use]
    pub fn same_filters(&self, other: &Self) -> bool {
        self.search == other.search && self.filters == other.filters
    }

    /// Whether any search or filter is restricting the collection.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.filter_set(&[]).is_pass_through()
    }

    /// This state with the page clamped to a result of `total` records.
    #[must_use]
    pub fn clamped(&self, total: usize) -> Self {
        Self {
            page: self.page.clamped(total),
            ..self.clone()
        }
    }

    /// Next state after `action`.
    ///
    /// Any change to the filter criteria sends the view back to page 1, as
    /// does a new page size. Page numbers are not clamped against the data
    /// here; the controller does that once it knows the filtered count.
    #[must_use]
    pub fn reduce(&self, action: &ViewAction) -> Self {
        let mut next = self.clone();
        match action {
            ViewAction::SetSearch { term, field } => {
                next.search = SearchSpec::new(term.clone(), field.clone());
            }
            ViewAction::SetFilter { field, value } => {
                if value.is_all() {
                    next.filters.shift_remove(field);
                } else {
                    next.filters.insert(field.clone(), value.clone());
                }
            }
            ViewAction::SetSort { field, direction } => {
                next.sort = Some(SortSpec::select(self.sort.as_ref(), field, *direction));
            }
            ViewAction::SetPage { page } => {
                next.page.current_page = (*page).max(1);
            }
            ViewAction::NextPage => {
                next.page.current_page = self.page.current_page.saturating_add(1);
            }
            ViewAction::PrevPage => {
                next.page.current_page = self.page.current_page.saturating_sub(1).max(1);
            }
            ViewAction::SetPageSize { page_size } => {
                if *page_size == 0 {
                    tracing::warn!("page size 0 is not allowed, using 1");
                }
                next.page = PageSpec::first(*page_size);
            }
            ViewAction::ClearFilters => {
                next.search = SearchSpec::default();
                next.filters.clear();
            }
        }

        if action.touches_filters() && !next.same_filters(self) {
            next.page.current_page = 1;
        }
        next
    }
}
