//! Single-column sorting

use std::cmp::Ordering;

use super::column::{find_column, resolve_value, ColumnSpec};
use super::value::{Record, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// The active sort column. At most one exists per table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column_id: &str, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.to_string(),
            direction,
        }
    }

    /// Next state after the header of `column_id` is activated:
    /// none → ascending → descending → none on the same column, and
    /// ascending on a column that was not the active one.
    pub fn cycle(current: Option<&SortKey>, column_id: &str) -> Option<SortKey> {
        match current {
            Some(key) if key.column_id == column_id => match key.direction {
                SortDirection::Ascending => Some(Self::new(column_id, SortDirection::Descending)),
                SortDirection::Descending => None,
            },
            _ => Some(Self::new(column_id, SortDirection::Ascending)),
        }
    }
}

/// Order `rows` (indices into `records`) by the sort key.
///
/// Without a key, or with a key naming no column, rows keep their order.
/// The sort is stable and places null values last in both directions.
pub fn sort<R: Record>(
    records: &[R],
    rows: Vec<usize>,
    key: Option<&SortKey>,
    columns: &[ColumnSpec<R>],
) -> Vec<usize> {
    let Some(key) = key else {
        return rows;
    };
    let Some(column) = find_column(columns, &key.column_id) else {
        return rows;
    };

    let mut keyed: Vec<(usize, Value)> = rows
        .into_iter()
        .map(|i| (i, resolve_value(&records[i], column)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| compare_values(a, b, key.direction));
    keyed.into_iter().map(|(i, _)| i).collect()
}

/// Compare two cell values for sorting.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ordering = compare_present(a, b);
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    if let (Value::Int(x), Value::Int(y)) = (a, b) {
        return x.cmp(y);
    }
    if let (Some(x), Some(y)) = (a.as_number(), b.as_number()) {
        return x.total_cmp(&y);
    }

    match (a, b) {
        (Value::Text(x), Value::Text(y)) => collate(x, y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => collate(&a.to_string(), &b.to_string()),
    }
}

/// Lexical comparison that ignores case first and falls back to the exact
/// text, so "apple" < "Banana" < "banana" < "cherry".
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}
