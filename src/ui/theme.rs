//! Color theme definitions

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_bright: Color,

    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub highlight: Color,

    // Tab colors
    pub tab_active: Color,
    pub tab_inactive: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::DarkGray,
            fg_bright: Color::White,

            accent: Color::Cyan,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection: Color::Blue,
            highlight: Color::Yellow,

            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Look a theme up by its settings name; unknown names get the default
    pub fn named(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::default(),
        }
    }

    /// Light theme variant
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            fg_bright: Color::Black,
            accent: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            border: Color::Gray,
            border_focused: Color::Blue,
            selection: Color::LightBlue,
            highlight: Color::Magenta,
            tab_active: Color::Blue,
            tab_inactive: Color::Gray,
        }
    }

    // Style helpers
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection).fg(self.fg_bright)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn tab_active(&self) -> Style {
        Style::default().fg(self.tab_active).add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.tab_inactive)
    }
}
