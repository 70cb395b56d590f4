//! Read-only view of one document with its lines

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::browser::{CellFormatter, Value};
use crate::models::Document;
use crate::ui::layout::DialogLayout;
use crate::ui::theme::Theme;

pub struct DocumentDetailsDialog {
    document: Document,
}

impl DocumentDetailsDialog {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns true when the dialog should close
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q'))
    }

    fn summary_lines(&self, formatter: &dyn CellFormatter, theme: &Theme) -> Vec<Line<'static>> {
        let doc = &self.document;
        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<10}", label), theme.dim()),
                Span::styled(value, theme.normal()),
            ])
        };

        let mut lines = vec![
            field("Number", doc.number.clone()),
            field("Partner", doc.partner_name().to_string()),
            field("Issued", formatter.format(&Value::Date(doc.issue_date))),
            field("Due", formatter.format(&Value::from(doc.due_date))),
            field("Status", doc.status.to_string()),
        ];
        if let Some(notes) = &doc.notes {
            lines.push(field("Notes", notes.clone()));
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame, formatter: &dyn CellFormatter, theme: &Theme) {
        let area = DialogLayout::new(frame.area(), 80, 70).dialog;
        frame.render_widget(Clear, area);

        let doc = &self.document;
        let block = Block::default()
            .title(format!(" {} {} ", doc.kind, doc.number))
            .borders(Borders::ALL)
            .border_style(theme.border_focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let summary = self.summary_lines(formatter, theme);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(summary.len() as u16 + 1),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(summary), chunks[0]);

        let money = |n: f64| formatter.format(&Value::Money(n));
        let header = Row::new(["Description", "Qty", "Unit price", "VAT %", "Net", "Gross"])
            .style(theme.accent().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = doc
            .lines
            .iter()
            .map(|line| {
                Row::new(vec![
                    Cell::from(line.description.clone()),
                    Cell::from(formatter.format(&Value::Float(line.quantity))),
                    Cell::from(money(line.unit_price)),
                    Cell::from(formatter.format(&Value::Float(line.vat_rate))),
                    Cell::from(money(line.net())),
                    Cell::from(money(line.gross())),
                ])
            })
            .collect();
        let widths = [
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(12),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), chunks[1]);

        let totals = vec![
            Line::from(format!("Net:   {}", money(doc.net_total()))),
            Line::from(format!("VAT:   {}", money(doc.vat_total()))),
            Line::from(Span::styled(
                format!("Total: {}", money(doc.gross_total())),
                theme.highlight(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(totals).alignment(ratatui::layout::Alignment::Right),
            chunks[2],
        );

        let hint = if doc.kind == crate::models::DocumentKind::Sale {
            " Esc = close  P = mark paid  x = export invoice"
        } else {
            " Esc = close  P = mark paid"
        };
        frame.render_widget(Paragraph::new(hint).style(theme.dim()), chunks[3]);
    }
}
