//! Yes/no confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;

pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    /// true = confirm highlighted
    pub selected: bool,
}

impl ConfirmDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            selected: false,
        }
    }

    /// Returns the answer once the user has given one
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = !self.selected;
                None
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            KeyCode::Enter => Some(self.selected),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let dialog_area = DialogLayout::centered(frame.area(), 50, 8).dialog;
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(theme.border_focused());
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .style(theme.normal())
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let button = |label: &str, active: bool| {
            let style = if active {
                theme.accent().add_modifier(Modifier::BOLD)
            } else {
                theme.dim()
            };
            Span::styled(format!("[ {} ]", label), style)
        };
        let buttons = Line::from(vec![
            Span::raw("  "),
            button("Yes", self.selected),
            Span::raw("    "),
            button("No", !self.selected),
        ]);
        frame.render_widget(Paragraph::new(buttons), chunks[1]);
    }
}
