//! Popup/modal widget

use ratatui::{
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Bordered popup drawn over whatever is below it
pub struct Popup<'a> {
    pub title: String,
    pub content: Text<'a>,
    pub style: Style,
    pub border_style: Style,
}

impl<'a> Popup<'a> {
    pub fn new(title: &str, content: impl Into<Text<'a>>) -> Self {
        Self {
            title: title.to_string(),
            content: content.into(),
            style: Style::default(),
            border_style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.border_style)
            .style(self.style);

        frame.render_widget(Paragraph::new(self.content).block(block), area);
    }
}
