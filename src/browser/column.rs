//! Column model: how a record maps to a displayed cell

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::{BrowserError, Result};
use super::value::{Record, Value};

/// Placeholder shown for cells that resolve to nothing
pub const PLACEHOLDER: &str = "-";

pub type ComputedFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;
pub type CellFn<R> = Arc<dyn Fn(&R, &dyn CellFormatter) -> String + Send + Sync>;
pub type HeaderFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Turns a cell value into display text (numbers, money, dates).
pub trait CellFormatter {
    fn format(&self, value: &Value) -> String;
}

/// Formatter that uses the default string form of every value
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

#[cfg(test)]
impl CellFormatter for PlainFormatter {
    fn format(&self, value: &Value) -> String {
        value.to_string()
    }
}

/// Where a column reads its value from
pub enum Accessor<R> {
    /// A named field of the record itself
    Field(String),
    /// Relation names followed by a field name, e.g. `partner.city`
    Path(Vec<String>),
    /// Derived from the whole record
    Computed(ComputedFn<R>),
}

impl<R> Accessor<R> {
    pub fn field(name: &str) -> Self {
        Self::Field(name.to_string())
    }

    /// Parse a dotted path. A single segment is a plain field.
    pub fn path(path: &str) -> Self {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.len() == 1 {
            Self::Field(path.to_string())
        } else {
            Self::Path(segments)
        }
    }

    pub fn computed(f: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }
}

impl<R: Record> Accessor<R> {
    pub fn resolve(&self, record: &R) -> Value {
        match self {
            Self::Field(name) => record.field(name),
            Self::Path(segments) => resolve_path(record, segments),
            Self::Computed(f) => f(record),
        }
    }
}

fn resolve_path(record: &dyn Record, segments: &[String]) -> Value {
    let Some((last, parents)) = segments.split_last() else {
        return Value::Null;
    };

    let mut current = record;
    for segment in parents {
        match current.relation(segment) {
            Some(next) => current = next,
            None => return Value::Null,
        }
    }
    current.field(last)
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(name) => Self::Field(name.clone()),
            Self::Path(segments) => Self::Path(segments.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(f, "Field({})", name),
            Self::Path(segments) => write!(f, "Path({})", segments.join(".")),
            Self::Computed(_) => write!(f, "Computed"),
        }
    }
}

/// Column header: fixed label or rendered on demand
#[derive(Clone)]
pub enum Header {
    Label(String),
    Render(HeaderFn),
}

impl Header {
    pub fn text(&self) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::Render(f) => f(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "Label({})", label),
            Self::Render(_) => write!(f, "Render"),
        }
    }
}

/// Declarative description of one table column
pub struct ColumnSpec<R> {
    pub id: String,
    pub header: Header,
    pub accessor: Accessor<R>,
    pub cell: Option<CellFn<R>>,
    pub sortable: bool,
    pub hideable: bool,
    /// Preferred display width in characters
    pub width: Option<u16>,
}

impl<R> ColumnSpec<R> {
    pub fn new(id: &str, header: &str, accessor: Accessor<R>) -> Self {
        Self {
            id: id.to_string(),
            header: Header::Label(header.to_string()),
            accessor,
            cell: None,
            sortable: true,
            hideable: true,
            width: None,
        }
    }

    /// Column backed by the record field of the same name
    pub fn field(id: &str, header: &str) -> Self {
        Self::new(id, header, Accessor::field(id))
    }

    pub fn path(id: &str, header: &str, path: &str) -> Self {
        Self::new(id, header, Accessor::path(path))
    }

    pub fn computed(
        id: &str,
        header: &str,
        f: impl Fn(&R) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self::new(id, header, Accessor::computed(f))
    }

    pub fn with_cell(
        mut self,
        f: impl Fn(&R, &dyn CellFormatter) -> String + Send + Sync + 'static,
    ) -> Self {
        self.cell = Some(Arc::new(f));
        self
    }

    pub fn with_header_fn(mut self, f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.header = Header::Render(Arc::new(f));
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Column that cannot be hidden
    pub fn fixed(mut self) -> Self {
        self.hideable = false;
        self
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            cell: self.cell.clone(),
            sortable: self.sortable,
            hideable: self.hideable,
            width: self.width,
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .finish()
    }
}

/// Follow the column accessor. Missing relations or fields give `Value::Null`.
pub fn resolve_value<R: Record>(record: &R, column: &ColumnSpec<R>) -> Value {
    column.accessor.resolve(record)
}

/// Display text for one cell
pub fn render_cell<R: Record>(
    record: &R,
    column: &ColumnSpec<R>,
    formatter: &dyn CellFormatter,
) -> String {
    if let Some(cell) = &column.cell {
        return cell(record, formatter);
    }

    match resolve_value(record, column) {
        Value::Null => PLACEHOLDER.to_string(),
        value => formatter.format(&value),
    }
}

/// Reject column sets with repeated ids
pub fn validate_columns<R>(columns: &[ColumnSpec<R>]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.id.as_str()) {
            return Err(BrowserError::DuplicateColumn(column.id.clone()));
        }
    }
    Ok(())
}

pub fn find_column<'a, R>(columns: &'a [ColumnSpec<R>], id: &str) -> Option<&'a ColumnSpec<R>> {
    columns.iter().find(|c| c.id == id)
}
