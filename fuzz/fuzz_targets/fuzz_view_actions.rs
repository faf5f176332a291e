#![no_main]
use cbom_explorer::view::{
    FilterValue, SearchField, SortDirection, ViewAction, ViewConfig, ViewController,
};
use cbom_explorer::DynamicRecord;
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Search(String, bool),
    Filter(u8, Option<String>),
    Sort(u8, Option<bool>),
    Page(u16),
    Next,
    Prev,
    PageSize(u8),
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    rows: Vec<(String, Option<i32>, Vec<String>)>,
    ops: Vec<Op>,
}

const FIELDS: &[&str] = &["name", "size", "tags"];

fn field(idx: u8) -> String {
    FIELDS[usize::from(idx) % FIELDS.len()].to_string()
}

/// Drive the controller with arbitrary action sequences and check that the
/// page window always stays inside the result.
fuzz_target!(|input: Input| {
    let records: Vec<DynamicRecord> = input
        .rows
        .into_iter()
        .take(256)
        .enumerate()
        .map(|(i, (name, size, tags))| {
            let value = serde_json::json!({ "id": i, "name": name, "size": size, "tags": tags });
            DynamicRecord::from_value(value)
        })
        .collect();

    let config = ViewConfig::builder()
        .filterable(FIELDS.iter().copied())
        .sortable(FIELDS.iter().copied())
        .page_size(7)
        .build();
    let Ok(mut view) = ViewController::new(records, config) else {
        return;
    };

    for op in input.ops.into_iter().take(64) {
        let action = match op {
            Op::Search(term, all) => ViewAction::SetSearch {
                term,
                field: if all { SearchField::All } else { SearchField::Field("name".into()) },
            },
            Op::Filter(idx, value) => ViewAction::SetFilter {
                field: field(idx),
                value: value.map_or(FilterValue::All, FilterValue::parse),
            },
            Op::Sort(idx, desc) => ViewAction::SetSort {
                field: field(idx),
                direction: desc.map(|d| if d { SortDirection::Desc } else { SortDirection::Asc }),
            },
            Op::Page(page) => ViewAction::SetPage { page: usize::from(page) },
            Op::Next => ViewAction::NextPage,
            Op::Prev => ViewAction::PrevPage,
            Op::PageSize(size) => ViewAction::SetPageSize { page_size: usize::from(size) },
            Op::Clear => ViewAction::ClearFilters,
        };
        view.dispatch(action);

        let derived = view.derived_view();
        assert!(derived.current_page() >= 1 && derived.current_page() <= derived.total_pages());
        assert!(derived.visible_page.len() <= derived.page.page_size);
    }
});
