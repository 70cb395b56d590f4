//! Column show/hide state

use std::collections::HashSet;

use super::column::ColumnSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityState {
    declared: HashSet<String>,
    locked: HashSet<String>,
    visible: HashSet<String>,
}

impl VisibilityState {
    /// Every declared column starts visible
    pub fn new<R>(columns: &[ColumnSpec<R>]) -> Self {
        let declared: HashSet<String> = columns.iter().map(|c| c.id.clone()).collect();
        Self {
            visible: declared.clone(),
            declared,
            locked: columns
                .iter()
                .filter(|c| !c.hideable)
                .map(|c| c.id.clone())
                .collect(),
        }
    }

    pub fn is_visible(&self, column_id: &str) -> bool {
        self.visible.contains(column_id)
    }

    /// Flip a column. Returns false, changing nothing, for columns that are
    /// not hideable or were never declared.
    pub fn toggle(&mut self, column_id: &str) -> bool {
        if self.locked.contains(column_id) || !self.declared.contains(column_id) {
            return false;
        }
        if !self.visible.remove(column_id) {
            self.visible.insert(column_id.to_string());
        }
        true
    }

    pub fn hidden_count(&self) -> usize {
        self.declared.len() - self.visible.len()
    }
}
