//! Fixed-size pagination over an ordered collection.

use serde::{Deserialize, Serialize};

/// Requested page geometry. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSpec {
    pub page_size: usize,
    pub current_page: usize,
}

impl PageSpec {
    /// First page of the given size. A zero size is bumped to 1.
    #[must_use]
    pub const fn first(page_size: usize) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
            current_page: 1,
        }
    }

    /// Number of pages needed for `len` items, never less than one.
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        let size = if self.page_size == 0 { 1 } else { self.page_size };
        let pages = len.div_ceil(size);
        if pages == 0 { 1 } else { pages }
    }

    /// The same spec with `current_page` clamped into `[1, total_pages]`.
    #[must_use]
    pub const fn clamped(self, len: usize) -> Self {
        let total = self.total_pages(len);
        let page = if self.current_page < 1 {
            1
        } else if self.current_page > total {
            total
        } else {
            self.current_page
        };
        Self {
            page_size: self.page_size,
            current_page: page,
        }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::first(crate::config::DEFAULT_PAGE_SIZE)
    }
}

/// Position of a page within the whole collection.
///
/// `start_index`/`end_index` are 1-based and inclusive, ready for a
/// "Showing X-Y of N" footer. Both are 0 for an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    /// Compute the window for `len` items under `spec` (clamping the page).
    #[must_use]
    pub fn compute(len: usize, spec: PageSpec) -> Self {
        let spec = spec.clamped(len);
        let total_pages = spec.total_pages(len);
        let offset = (spec.current_page - 1) * spec.page_size;
        let end = (offset + spec.page_size).min(len);
        let (start_index, end_index) = if offset < end {
            (offset + 1, end)
        } else {
            (0, 0)
        };
        Self {
            current_page: spec.current_page,
            total_pages,
            page_size: spec.page_size,
            total_count: len,
            start_index,
            end_index,
            has_next: spec.current_page < total_pages,
            has_prev: spec.current_page > 1,
        }
    }

    /// Slice range of the page in the collection.
    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        if self.start_index == 0 {
            0..0
        } else {
            (self.start_index - 1)..self.end_index
        }
    }

    /// Number of items on the page.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.range().end - self.range().start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One page of records plus its navigation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub info: PageInfo,
}

/// Slice `records` into the page described by `spec`.
///
/// Out-of-range pages are clamped rather than rejected, and an empty input
/// still reports one (empty) page.
pub fn paginate<T>(records: &[T], spec: PageSpec) -> Page<'_, T> {
    let info = PageInfo::compute(records.len(), spec);
    Page {
        items: &records[info.range()],
        info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(page_size: usize, current_page: usize) -> PageSpec {
        PageSpec {
            page_size,
            current_page,
        }
    }

    #[test]
    fn test_last_partial_page() {
        let records = [1, 2, 3, 4, 5];
        let page = paginate(&records, spec(2, 3));
        assert_eq!(page.items, &[5]);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.info.start_index, 5);
        assert_eq!(page.info.end_index, 5);
        assert!(!page.info.has_next);
        assert!(page.info.has_prev);
    }

    #[test]
    fn test_first_page() {
        let records = [1, 2, 3, 4, 5];
        let page = paginate(&records, spec(2, 1));
        assert_eq!(page.items, &[1, 2]);
        assert_eq!((page.info.start_index, page.info.end_index), (1, 2));
        assert!(page.info.has_next);
        assert!(!page.info.has_prev);
    }

    #[test]
    fn test_out_of_range_pages_are_clamped() {
        let records = [1, 2, 3];
        assert_eq!(paginate(&records, spec(2, 99)).info.current_page, 2);
        assert_eq!(paginate(&records, spec(2, 0)).info.current_page, 1);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let records: [u8; 0] = [];
        let page = paginate(&records, spec(10, 4));
        assert!(page.items.is_empty());
        assert_eq!(page.info.total_pages, 1);
        assert_eq!(page.info.current_page, 1);
        assert_eq!((page.info.start_index, page.info.end_index), (0, 0));
        assert!(!page.info.has_next);
        assert!(!page.info.has_prev);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(spec(5, 1).total_pages(10), 2);
        assert_eq!(spec(5, 1).total_pages(11), 3);
        assert_eq!(PageSpec::first(0).page_size, 1);
    }
}
