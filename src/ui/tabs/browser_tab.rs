//! A tab that browses one kind of record

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Paragraph, TableState},
    Frame,
};

use crate::app::actions::{table_action, TableAction};
use crate::app::events::apply_delta;
use crate::browser::{BrowserError, CellFormatter, ColumnSpec, PageSize, Record, TableBrowser};
use crate::ui::dialogs::columns::{ColumnsDialog, ColumnsResult};
use crate::ui::theme::Theme;
use crate::ui::widgets::searchbar::{SearchBar, SearchInput};
use crate::ui::widgets::table::{PageTable, RowStyleFn};

const KEY_HINTS: &str = "/ search  s sort  ←→ column  n/p page  +/- size  c columns";

/// What the tab did with a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    Handled,
    Ignored,
    /// Enter on a row; carries the record index
    Open(usize),
}

pub struct BrowserTab<R> {
    browser: TableBrowser<R>,
    table_state: TableState,
    search_bar: SearchBar,
    focused_column: usize,
    columns_dialog: Option<ColumnsDialog>,
    row_style: Option<RowStyleFn<R>>,
    loaded: bool,
    status: Option<String>,
}

impl<R: Record> BrowserTab<R> {
    pub fn new(
        columns: Vec<ColumnSpec<R>>,
        search_column: &str,
        page_size: PageSize,
    ) -> Result<Self, BrowserError> {
        let browser =
            TableBrowser::new(Vec::new(), columns, search_column)?.with_page_size(page_size);
        Ok(Self {
            browser,
            table_state: TableState::default().with_selected(Some(0)),
            search_bar: SearchBar::new(),
            focused_column: 0,
            columns_dialog: None,
            row_style: None,
            loaded: false,
            status: None,
        })
    }

    pub fn with_row_style(
        mut self,
        f: impl Fn(&R, &Theme) -> Option<Style> + Send + 'static,
    ) -> Self {
        self.row_style = Some(Box::new(f));
        self
    }

    pub fn browser(&self) -> &TableBrowser<R> {
        &self.browser
    }

    /// First load replaces everything; later loads keep search, sort and page
    pub fn load(&mut self, records: Vec<R>) {
        if self.loaded {
            self.browser.refresh_records(records);
        } else {
            self.browser.set_records(records);
            self.search_bar.clear();
            self.focused_column = 0;
            self.loaded = true;
        }
        self.clamp_selection();
    }

    /// Replace the record at `index` in place
    pub fn update_record(&mut self, index: usize, record: R) -> bool {
        let updated = self.browser.update_record(index, |r| *r = record);
        self.clamp_selection();
        updated
    }

    /// True while keys belong to the tab (typing a search, dialog open)
    pub fn captures_input(&self) -> bool {
        self.search_bar.active || self.columns_dialog.is_some()
    }

    pub fn selected(&self) -> Option<(usize, &R)> {
        self.browser.record_at_page_row(self.table_state.selected()?)
    }

    /// Short line describing the last thing that went wrong, if anything
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    pub fn summary(&self) -> String {
        let view = self.browser.view();
        format!("{}  page {}/{}", view.summary(), view.page_index + 1, view.page_count)
    }

    fn visible_column_ids(&self) -> Vec<String> {
        self.browser
            .columns()
            .iter()
            .filter(|c| self.browser.is_column_visible(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    fn page_len(&self) -> usize {
        self.browser.view().rows.len()
    }

    fn clamp_selection(&mut self) {
        let len = self.page_len();
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(selected.min(len.saturating_sub(1))));

        let visible = self.visible_column_ids().len();
        self.focused_column = self.focused_column.min(visible.saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> TabOutcome {
        if let Some(dialog) = &mut self.columns_dialog {
            match dialog.handle_key(key) {
                Some(ColumnsResult::Toggle(id)) => {
                    self.browser.toggle_column(&id);
                    self.clamp_selection();
                }
                Some(ColumnsResult::Close) => self.columns_dialog = None,
                None => {}
            }
            return TabOutcome::Handled;
        }

        if self.search_bar.active {
            if self.search_bar.handle_key(key) == SearchInput::Edited {
                self.browser.set_search_text(&self.search_bar.query);
                self.table_state.select(Some(0));
            }
            return TabOutcome::Handled;
        }

        let Some(action) = table_action(&key) else {
            return TabOutcome::Ignored;
        };

        match action {
            TableAction::MoveSelection(delta) => {
                let current = self.table_state.selected().unwrap_or(0);
                self.table_state.select(Some(apply_delta(current, delta, self.page_len())));
            }
            TableAction::NextPage => self.browser.next_page(),
            TableAction::PrevPage => self.browser.prev_page(),
            TableAction::FirstPage => self.browser.first_page(),
            TableAction::LastPage => self.browser.last_page(),
            TableAction::FocusNextColumn => {
                let visible = self.visible_column_ids().len();
                self.focused_column = (self.focused_column + 1).min(visible.saturating_sub(1));
            }
            TableAction::FocusPrevColumn => {
                self.focused_column = self.focused_column.saturating_sub(1);
            }
            TableAction::CycleSort => {
                if let Some(id) = self.visible_column_ids().get(self.focused_column) {
                    if let Err(e) = self.browser.cycle_sort(id) {
                        self.status = Some(e.to_string());
                    }
                }
            }
            TableAction::LargerPages => {
                let size = self.browser.state().page_size.larger();
                self.browser.set_page_size_to(size);
            }
            TableAction::SmallerPages => {
                let size = self.browser.state().page_size.smaller();
                self.browser.set_page_size_to(size);
            }
            TableAction::OpenFilter => self.search_bar.activate(),
            TableAction::ClearFilter => {
                self.search_bar.clear();
                self.browser.set_search_text("");
            }
            TableAction::ToggleColumns => {
                self.columns_dialog = Some(ColumnsDialog::new(self.browser.columns()));
            }
            TableAction::Open => {
                return match self.selected() {
                    Some((index, _)) => TabOutcome::Open(index),
                    None => TabOutcome::Handled,
                };
            }
        }

        self.clamp_selection();
        TabOutcome::Handled
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        formatter: &dyn CellFormatter,
    ) {
        let show_search = self.search_bar.active || !self.search_bar.query.is_empty();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(if show_search { 3 } else { 0 }),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        if show_search {
            let label = self
                .browser
                .columns()
                .iter()
                .find(|c| c.id == self.browser.search_column())
                .map(|c| c.header.text())
                .unwrap_or_default();
            self.search_bar
                .render(frame, chunks[0], &label, theme.normal(), theme.border_focused());
        }

        let view = self.browser.view();
        if view.rows.is_empty() {
            let message = if self.loaded { view.summary() } else { "Loading...".to_string() };
            frame.render_widget(Paragraph::new(message).style(theme.dim()), chunks[1]);
        } else {
            PageTable {
                view: &view,
                sort: self.browser.state().sort.as_ref(),
                focused_column: Some(self.focused_column),
                formatter,
                row_style: self.row_style.as_ref(),
            }
            .render(frame, chunks[1], theme, &mut self.table_state);
        }

        let footer = format!(
            " {}  page {}/{}  {} per page  │ {}",
            view.summary(),
            view.page_index + 1,
            view.page_count,
            view.page_size,
            KEY_HINTS,
        );
        frame.render_widget(Paragraph::new(footer).style(theme.dim()), chunks[2]);

        if let Some(dialog) = &mut self.columns_dialog {
            dialog.render(frame, &self.browser.state().visibility, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn products(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product::new(i as i64, &format!("SKU-{:03}", i), &format!("Product {:03}", i)))
            .collect()
    }

    fn tab() -> BrowserTab<Product> {
        let columns = vec![
            ColumnSpec::field("sku", "SKU").fixed(),
            ColumnSpec::field("name", "Name"),
            ColumnSpec::field("sale_price", "Price"),
        ];
        let mut tab = BrowserTab::new(columns, "name", PageSize::default()).unwrap();
        tab.load(products(57));
        tab
    }

    fn press(tab: &mut BrowserTab<Product>, code: KeyCode) -> TabOutcome {
        tab.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_filters_live() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Char('/'));
        assert!(tab.captures_input());
        for c in "05".chars() {
            press(&mut tab, KeyCode::Char(c));
        }
        press(&mut tab, KeyCode::Enter);

        assert!(!tab.captures_input());
        assert_eq!(tab.browser().filtered_count(), 8);

        press(&mut tab, KeyCode::Esc);
        assert_eq!(tab.browser().filtered_count(), 57);
    }

    #[test]
    fn enter_opens_record_on_current_page() {
        let mut tab = tab();
        press(&mut tab, KeyCode::PageDown);
        press(&mut tab, KeyCode::Down);
        assert_eq!(press(&mut tab, KeyCode::Enter), TabOutcome::Open(11));
    }

    #[test]
    fn sort_follows_focused_column() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Right);
        press(&mut tab, KeyCode::Char('s'));
        press(&mut tab, KeyCode::Char('s'));
        let sort = tab.browser().state().sort.clone().unwrap();
        assert_eq!(sort.column_id, "name");
        assert_eq!(tab.selected().map(|(i, _)| i), Some(56));
    }

    #[test]
    fn reload_keeps_page_and_search() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Char(']'));
        assert_eq!(tab.browser().state().page_index, 5);

        tab.load(products(57));
        assert_eq!(tab.browser().state().page_index, 5);

        tab.load(products(12));
        assert_eq!(tab.browser().state().page_index, 1);
    }

    #[test]
    fn page_size_keys_step_through_allowed_sizes() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Char('+'));
        assert_eq!(tab.browser().state().page_size.get(), 25);
        press(&mut tab, KeyCode::Char('-'));
        press(&mut tab, KeyCode::Char('-'));
        assert_eq!(tab.browser().state().page_size.get(), 10);
    }

    #[test]
    fn columns_dialog_toggles_visibility() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Char('c'));
        assert!(tab.captures_input());
        press(&mut tab, KeyCode::Down);
        press(&mut tab, KeyCode::Char(' '));
        press(&mut tab, KeyCode::Esc);

        assert!(!tab.captures_input());
        assert!(!tab.browser().is_column_visible("name"));
        assert!(tab.browser().is_column_visible("sku"));
    }
}
