//! Search bar widget

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What a key did to the search bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchInput {
    /// Query text changed
    Edited,
    /// Cursor moved, text unchanged
    Moved,
    /// Editing finished
    Done,
    Ignored,
}

/// Search bar state. The cursor counts characters, not bytes.
#[derive(Debug, Default)]
pub struct SearchBar {
    pub query: String,
    pub active: bool,
    cursor: usize,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.cursor = self.len();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    /// Apply an editing key while the bar is active
    pub fn handle_key(&mut self, key: KeyEvent) -> SearchInput {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.deactivate();
                SearchInput::Done
            }
            KeyCode::Backspace if self.backspace() => SearchInput::Edited,
            KeyCode::Delete if self.delete() => SearchInput::Edited,
            KeyCode::Left => {
                self.move_left();
                SearchInput::Moved
            }
            KeyCode::Right => {
                self.move_right();
                SearchInput::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                SearchInput::Moved
            }
            KeyCode::End => {
                self.cursor = self.len();
                SearchInput::Moved
            }
            KeyCode::Char(c) => {
                self.insert(c);
                SearchInput::Edited
            }
            _ => SearchInput::Ignored,
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        style: Style,
        focused_style: Style,
    ) {
        let border_style = if self.active { focused_style } else { style };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Search {} (Enter to keep, Esc in table to clear) ", label));

        let display_text = if self.query.is_empty() && !self.active {
            "Press / to search".to_string()
        } else {
            self.query.clone()
        };

        frame.render_widget(Paragraph::new(display_text).block(block).style(style), area);

        if self.active {
            frame.set_cursor_position((area.x + 1 + self.cursor as u16, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(bar: &mut SearchBar, code: KeyCode) -> SearchInput {
        bar.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn edits_at_cursor_with_multibyte_text() {
        let mut bar = SearchBar::new();
        bar.activate();
        for c in "São".chars() {
            press(&mut bar, KeyCode::Char(c));
        }
        press(&mut bar, KeyCode::Left);
        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.query, "So");
        assert_eq!(bar.cursor(), 1);
    }

    #[test]
    fn backspace_at_start_is_not_an_edit() {
        let mut bar = SearchBar::new();
        bar.activate();
        assert_eq!(press(&mut bar, KeyCode::Backspace), SearchInput::Ignored);
    }

    #[test]
    fn enter_finishes_and_keeps_query() {
        let mut bar = SearchBar::new();
        bar.activate();
        press(&mut bar, KeyCode::Char('x'));
        assert_eq!(press(&mut bar, KeyCode::Enter), SearchInput::Done);
        assert!(!bar.active);
        assert_eq!(bar.query, "x");
    }
}
