//! Column visibility dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::browser::visibility::VisibilityState;
use crate::browser::ColumnSpec;
use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;

struct Entry {
    id: String,
    label: String,
    hideable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnsResult {
    Toggle(String),
    Close,
}

pub struct ColumnsDialog {
    entries: Vec<Entry>,
    list_state: ListState,
}

impl ColumnsDialog {
    pub fn new<R>(columns: &[ColumnSpec<R>]) -> Self {
        let entries = columns
            .iter()
            .map(|c| Entry {
                id: c.id.clone(),
                label: c.header.text(),
                hideable: c.hideable,
            })
            .collect();
        Self {
            entries,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.list_state.selected()?)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ColumnsResult> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => Some(ColumnsResult::Close),
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_state.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let next = self.list_state.selected().map_or(0, |i| i + 1);
                self.list_state.select(Some(next.min(self.entries.len().saturating_sub(1))));
                None
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let entry = self.selected_entry()?;
                entry.hideable.then(|| ColumnsResult::Toggle(entry.id.clone()))
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, visibility: &VisibilityState, theme: &Theme) {
        let height = self.entries.len() as u16 + 4;
        let area = DialogLayout::centered(frame.area(), 40, height).dialog;
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let mark = if visibility.is_visible(&entry.id) { "[x]" } else { "[ ]" };
                let mut spans = vec![
                    Span::styled(format!("{} ", mark), theme.accent()),
                    Span::styled(entry.label.clone(), theme.normal()),
                ];
                if !entry.hideable {
                    spans.push(Span::styled("  (always shown)", theme.dim()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title(visibility))
                    .borders(Borders::ALL)
                    .border_style(theme.border_focused()),
            )
            .highlight_style(theme.selected());

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn title(visibility: &VisibilityState) -> String {
    match visibility.hidden_count() {
        0 => " Columns (space = toggle, Esc = close) ".to_string(),
        n => format!(" Columns, {} hidden (space = toggle, Esc = close) ", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut ColumnsDialog, code: KeyCode) -> Option<ColumnsResult> {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn fixed_columns_are_not_toggled() {
        let columns: Vec<ColumnSpec<Product>> = vec![
            ColumnSpec::field("sku", "SKU").fixed(),
            ColumnSpec::field("name", "Name"),
        ];
        let mut dialog = ColumnsDialog::new(&columns);

        assert_eq!(press(&mut dialog, KeyCode::Char(' ')), None);
        press(&mut dialog, KeyCode::Down);
        assert_eq!(
            press(&mut dialog, KeyCode::Char(' ')),
            Some(ColumnsResult::Toggle("name".to_string()))
        );
    }

    #[test]
    fn selection_stays_in_bounds() {
        let columns: Vec<ColumnSpec<Product>> = vec![ColumnSpec::field("name", "Name")];
        let mut dialog = ColumnsDialog::new(&columns);
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Down);
        assert_eq!(dialog.list_state.selected(), Some(0));
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(ColumnsResult::Close));
    }

    #[test]
    fn title_counts_hidden_columns() {
        let columns = crate::ui::tabs::products::columns();
        let mut visibility = VisibilityState::new(&columns);
        assert!(!title(&visibility).contains("hidden"));

        visibility.toggle("category");
        assert!(title(&visibility).contains("1 hidden"));
    }
}
