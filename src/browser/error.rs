//! Browser configuration errors

use thiserror::Error;

/// Structural misconfiguration of a table browser.
///
/// Normal data variation (missing fields, empty result sets, page indexes
/// that fall out of range) never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrowserError {
    #[error("duplicate column id `{0}`")]
    DuplicateColumn(String),

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error("column `{0}` is not sortable")]
    NotSortable(String),

    #[error("page size {size} is not one of {allowed:?}")]
    InvalidPageSize {
        size: usize,
        allowed: &'static [usize],
    },
}

pub type Result<T> = std::result::Result<T, BrowserError>;
