//! Renders a browser page as a ratatui table

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
    Frame,
};

use crate::browser::{render_cell, CellFormatter, ColumnSpec, DerivedView, Record, SortKey};
use crate::ui::theme::Theme;

/// Per-row style override, e.g. overdue documents
pub type RowStyleFn<R> = Box<dyn Fn(&R, &Theme) -> Option<Style> + Send>;

/// Header text with sort indicator
pub fn header_label<R>(column: &ColumnSpec<R>, sort: Option<&SortKey>) -> String {
    let label = column.header.text();
    match sort {
        Some(key) if key.column_id == column.id => {
            format!("{} {}", label, key.direction.indicator())
        }
        _ => label,
    }
}

/// Preferred widths become fixed lengths, the rest share what is left
pub fn column_constraints<R>(columns: &[&ColumnSpec<R>]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|c| match c.width {
            Some(width) => Constraint::Length(width),
            None => Constraint::Fill(1),
        })
        .collect()
}

pub struct PageTable<'v, 'a, R> {
    pub view: &'v DerivedView<'a, R>,
    pub sort: Option<&'v SortKey>,
    /// Index into the visible columns
    pub focused_column: Option<usize>,
    pub formatter: &'v dyn CellFormatter,
    pub row_style: Option<&'v RowStyleFn<R>>,
}

impl<R: Record> PageTable<'_, '_, R> {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, state: &mut TableState) {
        let header_cells = self.view.columns.iter().enumerate().map(|(i, column)| {
            let style = if self.focused_column == Some(i) {
                theme.highlight().add_modifier(Modifier::UNDERLINED)
            } else {
                theme.accent().add_modifier(Modifier::BOLD)
            };
            Cell::from(header_label(column, self.sort)).style(style)
        });
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .view
            .rows
            .iter()
            .map(|record| {
                let cells = self
                    .view
                    .columns
                    .iter()
                    .map(|column| Cell::from(render_cell(*record, *column, self.formatter)));
                let style = self
                    .row_style
                    .and_then(|f| f(*record, theme))
                    .unwrap_or_else(|| theme.normal());
                Row::new(cells).style(style)
            })
            .collect();

        let table = Table::new(rows, column_constraints(&self.view.columns))
            .header(header)
            .column_spacing(1)
            .row_highlight_style(theme.selected())
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::sort::SortDirection;
    use crate::models::Product;

    #[test]
    fn indicator_only_on_sorted_column() {
        let name: ColumnSpec<Product> = ColumnSpec::field("name", "Name");
        let sku: ColumnSpec<Product> = ColumnSpec::field("sku", "SKU");
        let key = SortKey::new("name", SortDirection::Descending);

        assert_eq!(header_label(&name, Some(&key)), "Name ▼");
        assert_eq!(header_label(&sku, Some(&key)), "SKU");
        assert_eq!(header_label(&name, None), "Name");
    }

    #[test]
    fn widths_become_constraints() {
        let a: ColumnSpec<Product> = ColumnSpec::field("sku", "SKU").with_width(10);
        let b: ColumnSpec<Product> = ColumnSpec::field("name", "Name");
        assert_eq!(
            column_constraints(&[&a, &b]),
            vec![Constraint::Length(10), Constraint::Fill(1)]
        );
    }
}
