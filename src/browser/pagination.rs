//! Fixed-size page slicing

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::{BrowserError, Result};

/// Page sizes a table accepts
pub const ALLOWED_PAGE_SIZES: &[usize] = &[10, 25, 50, 100];

/// A validated page size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self> {
        if ALLOWED_PAGE_SIZES.contains(&size) {
            Ok(Self(size))
        } else {
            Err(BrowserError::InvalidPageSize {
                size,
                allowed: ALLOWED_PAGE_SIZES,
            })
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// Next allowed size up, saturating at the largest
    pub fn larger(&self) -> Self {
        ALLOWED_PAGE_SIZES
            .iter()
            .find(|&&s| s > self.0)
            .map(|&s| Self(s))
            .unwrap_or(*self)
    }

    /// Next allowed size down, saturating at the smallest
    pub fn smaller(&self) -> Self {
        ALLOWED_PAGE_SIZES
            .iter()
            .rev()
            .find(|&&s| s < self.0)
            .map(|&s| Self(s))
            .unwrap_or(*self)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(ALLOWED_PAGE_SIZES[0])
    }
}

impl TryFrom<usize> for PageSize {
    type Error = BrowserError;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.0
    }
}

/// One page of a row collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Slice of the sorted rows shown on this page
    pub range: Range<usize>,
    /// Effective page index after clamping
    pub page_index: usize,
    pub page_count: usize,
    /// 1-based first row, 0 when there are no rows
    pub start_row: usize,
    /// 1-based last row (inclusive), 0 when there are no rows
    pub end_row: usize,
}

pub fn page_count(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Index clamped into `0..page_count`
pub fn clamp_page_index(len: usize, page_index: usize, page_size: PageSize) -> usize {
    page_index.min(page_count(len, page_size) - 1)
}

/// Window for `page_index` over `len` rows. An index past the last page
/// lands on the last page.
pub fn paginate(len: usize, page_index: usize, page_size: PageSize) -> PageWindow {
    let page_count = page_count(len, page_size);
    let page_index = page_index.min(page_count - 1);

    let start = (page_index * page_size.get()).min(len);
    let end = (start + page_size.get()).min(len);

    let (start_row, end_row) = if start == end { (0, 0) } else { (start + 1, end) };

    PageWindow {
        range: start..end,
        page_index,
        page_count,
        start_row,
        end_row,
    }
}

/// Page index that keeps the first row of the current page visible after
/// switching from `old` to `new` page size.
pub fn repaginate(len: usize, page_index: usize, old: PageSize, new: PageSize) -> usize {
    let first_row = clamp_page_index(len, page_index, old) * old.get();
    clamp_page_index(len, first_row / new.get(), new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn rejects_sizes_outside_allowed_set() {
        assert!(PageSize::new(0).is_err());
        assert!(PageSize::new(20).is_err());
        assert_eq!(size(25).get(), 25);
    }

    #[test]
    fn page_count_has_minimum_of_one() {
        for page_size in ALLOWED_PAGE_SIZES {
            let ps = size(*page_size);
            for len in [0usize, 1, 9, 10, 11, 57, 100, 101, 1000] {
                let expected = len.div_ceil(*page_size).max(1);
                assert_eq!(page_count(len, ps), expected, "len={} size={}", len, page_size);
            }
        }
    }

    #[test]
    fn fifty_seven_rows_by_ten() {
        let ps = size(10);
        assert_eq!(page_count(57, ps), 6);

        let first = paginate(57, 0, ps);
        assert_eq!((first.start_row, first.end_row), (1, 10));
        assert_eq!(first.range, 0..10);

        let last = paginate(57, 5, ps);
        assert_eq!((last.start_row, last.end_row), (51, 57));
        assert_eq!(last.range, 50..57);
    }

    #[test]
    fn out_of_range_index_clamps_to_last_page() {
        let window = paginate(57, 9, size(10));
        assert_eq!(window.page_index, 5);
        assert_eq!(window.range, 50..57);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let window = paginate(0, 3, size(10));
        assert_eq!(window.page_count, 1);
        assert_eq!(window.page_index, 0);
        assert_eq!(window.range, 0..0);
        assert_eq!((window.start_row, window.end_row), (0, 0));
    }

    #[test]
    fn clamped_page_is_never_empty_when_rows_exist() {
        for len in 1..=120 {
            for index in 0..15 {
                let window = paginate(len, index, size(10));
                assert!(!window.range.is_empty(), "len={} index={}", len, index);
            }
        }
    }

    #[test]
    fn repaginate_keeps_first_visible_row() {
        // rows 31-40 shown at size 10; at size 25 row 31 lives on page 1
        assert_eq!(repaginate(57, 3, size(10), size(25)), 1);
        // rows 26-50 shown at size 25; at size 10 row 26 lives on page 2
        assert_eq!(repaginate(57, 1, size(25), size(10)), 2);
        // growing past the collection lands on the only page
        assert_eq!(repaginate(57, 5, size(10), size(100)), 0);
    }

    #[test]
    fn larger_and_smaller_step_through_allowed_sizes() {
        assert_eq!(size(10).larger(), size(25));
        assert_eq!(size(100).larger(), size(100));
        assert_eq!(size(50).smaller(), size(25));
        assert_eq!(size(10).smaller(), size(10));
    }
}
