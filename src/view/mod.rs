//! Tabular data view engine.
//!
//! Records flow through a fixed pipeline:
//!
//! ```text
//! records -> filter options (per dataset)
//!         -> predicate (per search/filter change)
//!         -> sort (per sort change)
//!         -> paginate (per page change) -> visible rows
//! ```
//!
//! Every stage except [`ViewController`] is a pure function. The controller
//! owns the [`ViewState`] and recomputes only what an action invalidated.
//!
//! ```
//! use cbom_explorer::model::{Certificate, RecordSchema};
//! use cbom_explorer::view::ViewController;
//!
//! let certs = vec![Certificate::default(); 3];
//! let mut view = ViewController::new(certs, Certificate::view_config()).unwrap();
//! view.set_filter("status", "expired");
//! assert_eq!(view.derived_view().total_count(), 0);
//! ```

mod config;
mod controller;
pub mod debounce;
mod index;
mod paginate;
mod predicate;
mod sort;
mod state;

pub use config::{ViewConfig, ViewConfigBuilder, is_valid_field_name};
pub use controller::{DerivedView, ViewController};
pub use debounce::{
    DEFAULT_DEBOUNCE_MS, DebounceHandle, DebounceTimer, DebouncedInput, Debouncer,
};
pub use index::{FilterOptions, build_filter_options};
pub use paginate::{Page, PageInfo, PageSpec, paginate};
pub use predicate::{
    FilterMap, FilterSet, FilterValue, SearchField, SearchSpec, filter_indices, matches,
    matches_filters, matches_search,
};
pub use sort::{SortDirection, SortSpec, compare, sort_records, sorted_indices};
pub use state::{ViewAction, ViewState};
