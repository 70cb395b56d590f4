//! Key bindings for table browsing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::events::navigation_delta;

/// What a key does inside a table tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    MoveSelection(i32),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    FocusNextColumn,
    FocusPrevColumn,
    /// Sort by the focused column: ascending, descending, off
    CycleSort,
    LargerPages,
    SmallerPages,
    OpenFilter,
    ClearFilter,
    ToggleColumns,
    Open,
}

/// Map a key to a table action
pub fn table_action(key: &KeyEvent) -> Option<TableAction> {
    if let Some(delta) = navigation_delta(key) {
        return Some(TableAction::MoveSelection(delta));
    }

    let action = match (key.code, key.modifiers) {
        (KeyCode::PageDown, _) | (KeyCode::Char('n'), KeyModifiers::NONE) => TableAction::NextPage,
        (KeyCode::PageUp, _) | (KeyCode::Char('p'), KeyModifiers::NONE) => TableAction::PrevPage,
        (KeyCode::Char('['), _) => TableAction::FirstPage,
        (KeyCode::Char(']'), _) => TableAction::LastPage,
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
            TableAction::FocusNextColumn
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            TableAction::FocusPrevColumn
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => TableAction::CycleSort,
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => TableAction::LargerPages,
        (KeyCode::Char('-'), _) => TableAction::SmallerPages,
        (KeyCode::Char('/'), _) => TableAction::OpenFilter,
        (KeyCode::Esc, _) => TableAction::ClearFilter,
        (KeyCode::Char('c'), KeyModifiers::NONE) => TableAction::ToggleColumns,
        (KeyCode::Enter, _) => TableAction::Open,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn paging_keys() {
        assert_eq!(table_action(&key(KeyCode::PageDown)), Some(TableAction::NextPage));
        assert_eq!(table_action(&key(KeyCode::Char('p'))), Some(TableAction::PrevPage));
        assert_eq!(table_action(&key(KeyCode::Char(']'))), Some(TableAction::LastPage));
    }

    #[test]
    fn navigation_wins_over_column_keys() {
        assert_eq!(table_action(&key(KeyCode::Char('j'))), Some(TableAction::MoveSelection(1)));
        assert_eq!(table_action(&key(KeyCode::Char('l'))), Some(TableAction::FocusNextColumn));
    }

    #[test]
    fn unbound_key_is_none() {
        assert_eq!(table_action(&key(KeyCode::Char('z'))), None);
    }
}
