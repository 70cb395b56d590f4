//! Client-side tabular data browser.
//!
//! Records arrive already loaded; the browser narrows them by search text,
//! orders them by one column, slices them into pages and tracks which columns
//! are shown. Nothing here performs I/O.

pub mod column;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod sort;
pub mod table;
pub mod value;
pub mod visibility;

pub use column::{render_cell, CellFormatter, ColumnSpec};
pub use error::BrowserError;
pub use pagination::PageSize;
pub use sort::SortKey;
pub use table::{DerivedView, TableBrowser};
pub use value::{Record, Value};
