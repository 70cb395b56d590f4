//! Table browser: filter → sort → paginate over in-memory records

use std::cell::OnceCell;

use super::column::{find_column, validate_columns, ColumnSpec};
use super::error::{BrowserError, Result};
use super::filter::filter;
use super::pagination::{clamp_page_index, paginate, repaginate, PageSize};
use super::sort::{sort, SortKey};
use super::value::Record;
use super::visibility::VisibilityState;

/// Mutable state of one browser instance
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub search_text: String,
    pub sort: Option<SortKey>,
    pub visibility: VisibilityState,
    pub page_index: usize,
    pub page_size: PageSize,
}

impl TableState {
    fn new<R>(columns: &[ColumnSpec<R>], page_size: PageSize) -> Self {
        Self {
            search_text: String::new(),
            sort: None,
            visibility: VisibilityState::new(columns),
            page_index: 0,
            page_size,
        }
    }
}

/// Snapshot of what a table shows for the current state
#[derive(Debug)]
pub struct DerivedView<'a, R> {
    /// Records on the current page, in display order
    pub rows: Vec<&'a R>,
    /// Positions of `rows` in the browser's record list
    pub row_indices: Vec<usize>,
    /// Visible columns in declaration order
    pub columns: Vec<&'a ColumnSpec<R>>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub start_row: usize,
    pub end_row: usize,
}

impl<R> DerivedView<'_, R> {
    /// "Showing 11–20 of 57"
    pub fn summary(&self) -> String {
        if self.filtered_count == 0 {
            return if self.total_count == 0 {
                "No rows".to_string()
            } else {
                format!("No matches in {} rows", self.total_count)
            };
        }

        let mut text = format!(
            "Showing {}–{} of {}",
            self.start_row, self.end_row, self.filtered_count
        );
        if self.filtered_count != self.total_count {
            text.push_str(&format!(" (filtered from {})", self.total_count));
        }
        text
    }
}

/// Client-side browser over a record collection.
///
/// All state changes go through the methods below. Each one leaves the page
/// index inside the valid range before returning, and drops the cached row
/// order so the next [`TableBrowser::view`] reflects the change.
pub struct TableBrowser<R> {
    records: Vec<R>,
    columns: Vec<ColumnSpec<R>>,
    search_column: String,
    default_page_size: PageSize,
    state: TableState,
    ordered: OnceCell<Vec<usize>>,
}

impl<R: Record> TableBrowser<R> {
    pub fn new(records: Vec<R>, columns: Vec<ColumnSpec<R>>, search_column: &str) -> Result<Self> {
        validate_columns(&columns)?;
        if find_column(&columns, search_column).is_none() {
            return Err(BrowserError::UnknownColumn(search_column.to_string()));
        }

        let default_page_size = PageSize::default();
        Ok(Self {
            state: TableState::new(&columns, default_page_size),
            records,
            columns,
            search_column: search_column.to_string(),
            default_page_size,
            ordered: OnceCell::new(),
        })
    }

    /// Page size used initially and after every reset
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.default_page_size = page_size;
        self.state.page_size = page_size;
        self.state.page_index = 0;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn columns(&self) -> &[ColumnSpec<R>] {
        &self.columns
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn search_column(&self) -> &str {
        &self.search_column
    }

    /// Filtered and sorted record indices
    fn ordered_rows(&self) -> &[usize] {
        self.ordered.get_or_init(|| {
            let Some(column) = find_column(&self.columns, &self.search_column) else {
                return Vec::new();
            };
            let rows = filter(&self.records, &self.state.search_text, &column.accessor);
            sort(&self.records, rows, self.state.sort.as_ref(), &self.columns)
        })
    }

    pub fn filtered_count(&self) -> usize {
        self.ordered_rows().len()
    }

    pub fn view(&self) -> DerivedView<'_, R> {
        let ordered = self.ordered_rows();
        let window = paginate(ordered.len(), self.state.page_index, self.state.page_size);
        let row_indices = ordered[window.range.clone()].to_vec();

        DerivedView {
            rows: row_indices.iter().map(|&i| &self.records[i]).collect(),
            row_indices,
            columns: self
                .columns
                .iter()
                .filter(|c| self.state.visibility.is_visible(&c.id))
                .collect(),
            total_count: self.records.len(),
            filtered_count: ordered.len(),
            page_index: window.page_index,
            page_count: window.page_count,
            page_size: self.state.page_size.get(),
            start_row: window.start_row,
            end_row: window.end_row,
        }
    }

    /// Record shown at `row` (0-based) of the current page
    pub fn record_at_page_row(&self, row: usize) -> Option<(usize, &R)> {
        let ordered = self.ordered_rows();
        let window = paginate(ordered.len(), self.state.page_index, self.state.page_size);
        let index = *ordered[window.range].get(row)?;
        Some((index, &self.records[index]))
    }

    pub fn set_search_text(&mut self, text: &str) {
        if self.state.search_text == text {
            return;
        }
        self.state.search_text = text.to_string();
        self.invalidate();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> Result<()> {
        if let Some(key) = &sort {
            self.check_sortable(&key.column_id)?;
        }
        self.state.sort = sort;
        self.invalidate();
        Ok(())
    }

    /// Header activation: none → ascending → descending → none
    pub fn cycle_sort(&mut self, column_id: &str) -> Result<()> {
        self.check_sortable(column_id)?;
        self.state.sort = SortKey::cycle(self.state.sort.as_ref(), column_id);
        self.invalidate();
        Ok(())
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.state.page_index = page_index;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.state.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.state.page_index.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(0);
    }

    pub fn last_page(&mut self) {
        self.set_page(usize::MAX);
    }

    /// Change the page size, keeping the first visible row on screen
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        self.set_page_size_to(PageSize::new(size)?);
        Ok(())
    }

    pub fn set_page_size_to(&mut self, size: PageSize) {
        let len = self.filtered_count();
        self.state.page_index = repaginate(len, self.state.page_index, self.state.page_size, size);
        self.state.page_size = size;
    }

    /// Returns whether the column's visibility changed
    pub fn toggle_column(&mut self, column_id: &str) -> bool {
        let changed = self.state.visibility.toggle(column_id);
        if !changed {
            tracing::debug!("Column {} cannot be hidden", column_id);
        }
        changed
    }

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.state.visibility.is_visible(column_id)
    }

    /// Replace the dataset with a different one. State goes back to defaults.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.reset_state();
    }

    /// Reload the same dataset. Search, sort, visibility and page survive;
    /// the page index is clamped to the new row count.
    pub fn refresh_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.invalidate();
    }

    /// Modify one record in place. State is preserved.
    pub fn update_record(&mut self, index: usize, f: impl FnOnce(&mut R)) -> bool {
        let Some(record) = self.records.get_mut(index) else {
            return false;
        };
        f(record);
        self.invalidate();
        true
    }

    /// Replace the column set. State goes back to defaults.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec<R>>) -> Result<()> {
        validate_columns(&columns)?;
        if find_column(&columns, &self.search_column).is_none() {
            return Err(BrowserError::UnknownColumn(self.search_column.clone()));
        }
        self.columns = columns;
        self.reset_state();
        Ok(())
    }

    fn check_sortable(&self, column_id: &str) -> Result<()> {
        match find_column(&self.columns, column_id) {
            None => Err(BrowserError::UnknownColumn(column_id.to_string())),
            Some(column) if !column.sortable => {
                Err(BrowserError::NotSortable(column_id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    fn reset_state(&mut self) {
        self.state = TableState::new(&self.columns, self.default_page_size);
        self.ordered = OnceCell::new();
    }

    fn invalidate(&mut self) {
        self.ordered = OnceCell::new();
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let len = self.filtered_count();
        self.state.page_index = clamp_page_index(len, self.state.page_index, self.state.page_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::column::tests::{item, Item};
    use crate::browser::sort::SortDirection;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<ColumnSpec<Item>> {
        vec![
            ColumnSpec::field("name", "Name").fixed(),
            ColumnSpec::field("qty", "Qty"),
            ColumnSpec::path("city", "City", "owner.city").not_sortable(),
        ]
    }

    fn numbered(count: usize) -> Vec<Item> {
        (1..=count)
            .map(|i| item(&format!("item-{:03}", i), Some(i as i64)))
            .collect()
    }

    fn browser(count: usize) -> TableBrowser<Item> {
        TableBrowser::new(numbered(count), columns(), "name").unwrap()
    }

    fn page_names(browser: &TableBrowser<Item>) -> Vec<String> {
        browser.view().rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn construction_rejects_duplicate_columns() {
        let mut cols = columns();
        cols.push(ColumnSpec::field("qty", "Again"));
        let err = TableBrowser::new(numbered(3), cols, "name").err();
        assert_eq!(err, Some(BrowserError::DuplicateColumn("qty".to_string())));
    }

    #[test]
    fn construction_rejects_unknown_search_column() {
        let err = TableBrowser::new(numbered(3), columns(), "sku").err();
        assert_eq!(err, Some(BrowserError::UnknownColumn("sku".to_string())));
    }

    #[test]
    fn fifty_seven_records_in_pages_of_ten() {
        let mut browser = browser(57);

        let view = browser.view();
        assert_eq!(view.page_count, 6);
        assert_eq!((view.start_row, view.end_row), (1, 10));
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.summary(), "Showing 1–10 of 57");

        browser.set_page(5);
        let view = browser.view();
        assert_eq!((view.start_row, view.end_row), (51, 57));
        assert_eq!(view.rows.len(), 7);
        assert_eq!(view.rows[0].name, "item-051");
    }

    #[test]
    fn zero_matches_gives_single_empty_page() {
        let mut browser = browser(57);
        browser.set_search_text("abc");

        let view = browser.view();
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.page_count, 1);
        assert!(view.rows.is_empty());
        assert_eq!((view.start_row, view.end_row), (0, 0));
        assert_eq!(view.summary(), "No matches in 57 rows");
    }

    #[test]
    fn search_shrinking_results_clamps_page() {
        let mut browser = browser(57);
        browser.set_page(4);
        browser.set_search_text("item-00");

        assert_eq!(browser.state().page_index, 0);
        let view = browser.view();
        assert_eq!(view.filtered_count, 9);
        assert!(!view.rows.is_empty());
        assert_eq!(view.summary(), "Showing 1–9 of 9 (filtered from 57)");
    }

    #[test]
    fn repeated_header_activation_cycles_sort() {
        let mut browser = browser(12);
        let original = page_names(&browser);

        browser.cycle_sort("qty").unwrap();
        assert_eq!(
            browser.state().sort,
            Some(SortKey::new("qty", SortDirection::Ascending))
        );
        assert_eq!(page_names(&browser)[0], "item-001");

        browser.cycle_sort("qty").unwrap();
        assert_eq!(
            browser.state().sort,
            Some(SortKey::new("qty", SortDirection::Descending))
        );
        assert_eq!(page_names(&browser)[0], "item-012");

        browser.cycle_sort("qty").unwrap();
        assert_eq!(browser.state().sort, None);
        assert_eq!(page_names(&browser), original);
    }

    #[test]
    fn sorting_rejects_unknown_and_unsortable_columns() {
        let mut browser = browser(3);
        assert_eq!(
            browser.cycle_sort("price"),
            Err(BrowserError::UnknownColumn("price".to_string()))
        );
        assert_eq!(
            browser.set_sort(Some(SortKey::new("city", SortDirection::Ascending))),
            Err(BrowserError::NotSortable("city".to_string()))
        );
        assert_eq!(browser.state().sort, None);
    }

    #[test]
    fn replacing_records_resets_state_and_page() {
        let mut browser = browser(57);
        browser.set_page(3);
        browser.cycle_sort("qty").unwrap();
        assert_eq!(browser.state().page_index, 3);

        browser.set_records(numbered(4));
        assert_eq!(browser.state().page_index, 0);
        assert_eq!(browser.state().sort, None);
        assert_eq!(browser.view().page_count, 1);
    }

    #[test]
    fn refreshing_records_preserves_state_and_clamps() {
        let mut browser = browser(57);
        browser.set_page(3);
        browser.cycle_sort("qty").unwrap();
        browser.toggle_column("qty");

        browser.refresh_records(numbered(15));
        let state = browser.state();
        assert_eq!(state.page_index, 1);
        assert_eq!(state.sort, Some(SortKey::new("qty", SortDirection::Ascending)));
        assert!(!browser.is_column_visible("qty"));
    }

    #[test]
    fn in_place_update_keeps_state() {
        let mut browser = browser(30);
        browser.set_page(2);
        browser.cycle_sort("qty").unwrap();

        assert!(browser.update_record(25, |r| r.qty = Some(0)));
        assert_eq!(browser.state().page_index, 2);
        assert_eq!(page_names(&browser)[0], "item-020");
        assert!(!browser.update_record(99, |r| r.qty = None));
    }

    #[test]
    fn page_size_change_keeps_first_visible_row() {
        let mut browser = browser(57);
        browser.set_page(3);
        assert_eq!(page_names(&browser)[0], "item-031");

        browser.set_page_size(25).unwrap();
        let view = browser.view();
        assert_eq!(view.page_index, 1);
        assert!(view.rows.iter().any(|r| r.name == "item-031"));
        assert_eq!((view.start_row, view.end_row), (26, 50));
    }

    #[test]
    fn typed_page_size_repaginates_like_raw_size() {
        let mut browser = browser(57);
        browser.set_page(3);
        browser.set_page_size_to(PageSize::new(50).unwrap());
        assert_eq!(browser.state().page_size.get(), 50);
        assert_eq!(browser.state().page_index, 0);
        assert_eq!(browser.view().end_row, 50);
    }

    #[test]
    fn invalid_page_size_is_rejected_and_state_kept() {
        let mut browser = browser(57);
        browser.set_page(2);
        assert!(browser.set_page_size(20).is_err());
        assert_eq!(browser.state().page_size.get(), 10);
        assert_eq!(browser.state().page_index, 2);
    }

    #[test]
    fn page_navigation_stays_in_range() {
        let mut browser = browser(57);
        browser.prev_page();
        assert_eq!(browser.state().page_index, 0);
        browser.last_page();
        assert_eq!(browser.state().page_index, 5);
        browser.next_page();
        assert_eq!(browser.state().page_index, 5);
        browser.set_page(100);
        assert_eq!(browser.state().page_index, 5);
    }

    #[test]
    fn hidden_columns_leave_the_view() {
        let mut browser = browser(3);
        assert!(browser.toggle_column("city"));
        assert!(!browser.toggle_column("name"));

        let ids: Vec<&str> = browser.view().columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "qty"]);
    }

    #[test]
    fn view_is_repeatable() {
        let mut browser = browser(40);
        browser.set_search_text("item-0");
        browser.cycle_sort("qty").unwrap();
        browser.cycle_sort("qty").unwrap();
        browser.set_page(1);

        let first = browser.view();
        let second = browser.view();
        assert_eq!(first.row_indices, second.row_indices);
        assert_eq!(first.summary(), second.summary());
    }

    #[test]
    fn record_at_page_row_maps_to_record_index() {
        let mut browser = browser(57);
        browser.cycle_sort("qty").unwrap();
        browser.cycle_sort("qty").unwrap();
        browser.set_page(1);

        let (index, record) = browser.record_at_page_row(0).unwrap();
        assert_eq!(index, 46);
        assert_eq!(record.name, "item-047");
        assert!(browser.record_at_page_row(10).is_none());
    }

    #[test]
    fn replacing_columns_validates_and_resets() {
        let mut browser = browser(20);
        browser.set_page(1);

        let mut dup = columns();
        dup.push(ColumnSpec::field("name", "Dup"));
        assert!(browser.set_columns(dup).is_err());
        assert_eq!(browser.state().page_index, 1);

        browser.set_columns(columns()).unwrap();
        assert_eq!(browser.state().page_index, 0);
    }
}
