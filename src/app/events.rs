//! Input event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Application input events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Event handler for terminal input
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Option<AppEvent> {
        if event::poll(self.tick_rate).ok()? {
            match event::read().ok()? {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                _ => None,
            }
        } else {
            Some(AppEvent::Tick)
        }
    }
}

/// Check if this is a quit key combination
pub fn is_quit(event: &KeyEvent) -> bool {
    matches!(
        (event.code, event.modifiers),
        (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

pub fn is_help(event: &KeyEvent) -> bool {
    matches!(event.code, KeyCode::Char('?') | KeyCode::F(1))
}

/// Check for navigation keys (returns delta)
pub fn navigation_delta(event: &KeyEvent) -> Option<i32> {
    match (event.code, event.modifiers) {
        (KeyCode::Up, KeyModifiers::NONE) => Some(-1),
        (KeyCode::Down, KeyModifiers::NONE) => Some(1),
        (KeyCode::Home, KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::End, KeyModifiers::NONE) => Some(i32::MAX),

        // Vi-style
        (KeyCode::Char('k'), KeyModifiers::NONE) => Some(-1),
        (KeyCode::Char('j'), KeyModifiers::NONE) => Some(1),
        (KeyCode::Char('g'), KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Some(i32::MAX),

        _ => None,
    }
}

/// Check for tab navigation (returns delta)
pub fn tab_delta(event: &KeyEvent) -> Option<i32> {
    match (event.code, event.modifiers) {
        (KeyCode::Tab, KeyModifiers::NONE) => Some(1),
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Some(-1),
        _ => None,
    }
}

/// Check for tab number keys (1-5)
pub fn tab_number(event: &KeyEvent) -> Option<usize> {
    match event.code {
        KeyCode::Char(c @ '1'..='5') => Some(c as usize - '1' as usize),
        _ => None,
    }
}

/// Move a selection by `delta` within `len` rows
pub fn apply_delta(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match delta {
        i32::MIN => 0,
        i32::MAX => len - 1,
        d => (current as i64 + d as i64).clamp(0, len as i64 - 1) as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_numbers_are_zero_based() {
        assert_eq!(tab_number(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(tab_number(&key(KeyCode::Char('5'))), Some(4));
        assert_eq!(tab_number(&key(KeyCode::Char('6'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn delta_clamps_to_rows() {
        assert_eq!(apply_delta(0, -1, 5), 0);
        assert_eq!(apply_delta(3, 1, 5), 4);
        assert_eq!(apply_delta(4, 1, 5), 4);
        assert_eq!(apply_delta(2, i32::MAX, 5), 4);
        assert_eq!(apply_delta(2, i32::MIN, 5), 0);
        assert_eq!(apply_delta(2, 1, 0), 0);
    }
}
