//! Sales and purchases tabs

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};

use crate::app::state::AppMessage;
use crate::browser::{BrowserError, CellFormatter, ColumnSpec, PageSize, Value};
use crate::models::{Document, DocumentKind, DocumentStatus};
use crate::ui::dialogs::confirm::ConfirmDialog;
use crate::ui::dialogs::document_details::DocumentDetailsDialog;
use crate::ui::tabs::browser_tab::{BrowserTab, TabOutcome};
use crate::ui::theme::Theme;

pub fn columns(kind: DocumentKind) -> Vec<ColumnSpec<Document>> {
    let partner_header = match kind {
        DocumentKind::Sale => "Client",
        DocumentKind::Purchase => "Supplier",
    };
    vec![
        ColumnSpec::field("number", "Number").with_width(12).fixed(),
        ColumnSpec::field("issue_date", "Date").with_width(10),
        ColumnSpec::path("partner", partner_header, "partner.name"),
        ColumnSpec::path("partner_city", "City", "partner.city").with_width(10),
        ColumnSpec::field("due_date", "Due").with_width(10),
        ColumnSpec::field("status", "Status").with_width(9),
        ColumnSpec::field("line_count", "Lines").with_width(5),
        ColumnSpec::field("net_total", "Net").with_width(12),
        ColumnSpec::field("gross_total", "Total").with_width(12),
        ColumnSpec::computed("overdue", "Late", |d: &Document| {
            let days = d
                .due_date
                .filter(|_| d.is_overdue(Local::now().date_naive()))
                .map(|due| (Local::now().date_naive() - due).num_days());
            Value::from(days)
        })
        .with_cell(|d, formatter| {
            match d.due_date.filter(|_| d.is_overdue(Local::now().date_naive())) {
                Some(due) => format!(
                    "{} d",
                    formatter.format(&Value::Int((Local::now().date_naive() - due).num_days()))
                ),
                None => String::new(),
            }
        })
        .with_header_fn(|| format!("Late @{}", Local::now().format("%d/%m")))
        .with_width(11),
    ]
}

pub struct DocumentsTab {
    kind: DocumentKind,
    table: BrowserTab<Document>,
    details: Option<DocumentDetailsDialog>,
    confirm: Option<(ConfirmDialog, String)>,
}

impl DocumentsTab {
    pub fn new(kind: DocumentKind, page_size: PageSize) -> Result<Self, BrowserError> {
        let table = BrowserTab::new(columns(kind), "partner", page_size)?.with_row_style(
            |d: &Document, theme| match d.status {
                DocumentStatus::Cancelled => Some(theme.dim()),
                DocumentStatus::Paid => None,
                _ if d.is_overdue(Local::now().date_naive()) => Some(theme.warning()),
                _ => None,
            },
        );
        Ok(Self {
            kind,
            table,
            details: None,
            confirm: None,
        })
    }

    pub fn table(&self) -> &BrowserTab<Document> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut BrowserTab<Document> {
        &mut self.table
    }

    pub fn load(&mut self, documents: Vec<Document>) {
        self.table.load(documents);
    }

    /// Swap in a changed document, matched by number
    pub fn apply_update(&mut self, document: &Document) -> bool {
        if document.kind != self.kind {
            return false;
        }
        if let Some(details) = &mut self.details {
            if details.document().number == document.number {
                *details = DocumentDetailsDialog::new(document.clone());
            }
        }
        let index = self
            .table
            .browser()
            .records()
            .iter()
            .position(|d| d.number == document.number);
        match index {
            Some(index) => self.table.update_record(index, document.clone()),
            None => false,
        }
    }

    pub fn captures_input(&self) -> bool {
        self.details.is_some() || self.confirm.is_some() || self.table.captures_input()
    }

    fn current_document(&self) -> Option<&Document> {
        match &self.details {
            Some(details) => Some(details.document()),
            None => self.table.selected().map(|(_, d)| d),
        }
    }

    fn request_mark_paid(&mut self) {
        let Some(document) = self.current_document() else {
            return;
        };
        if !document.is_open() {
            return;
        }
        let number = document.number.clone();
        let dialog = ConfirmDialog::new("Mark as paid", &format!("Mark {} as paid?", number));
        self.confirm = Some((dialog, number));
    }

    fn export_request(&self) -> Option<AppMessage> {
        let document = self.current_document()?;
        (document.kind == DocumentKind::Sale).then(|| AppMessage::ExportInvoice {
            number: document.number.clone(),
        })
    }

    /// Handle a key; returns a request for the state manager, if any
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppMessage> {
        if let Some((dialog, number)) = &mut self.confirm {
            let answer = dialog.handle_key(key)?;
            let number = number.clone();
            self.confirm = None;
            return answer.then_some(AppMessage::MarkPaid { number });
        }

        let shortcut = !self.table.captures_input();
        if shortcut {
            match (key.code, key.modifiers) {
                (KeyCode::Char('P'), _) => {
                    self.request_mark_paid();
                    return None;
                }
                (KeyCode::Char('x'), KeyModifiers::NONE) => return self.export_request(),
                _ => {}
            }
        }

        if let Some(details) = &mut self.details {
            if details.handle_key(key) {
                self.details = None;
            }
            return None;
        }

        if let TabOutcome::Open(index) = self.table.handle_key(key) {
            if let Some(document) = self.table.browser().records().get(index) {
                self.details = Some(DocumentDetailsDialog::new(document.clone()));
            }
        }
        None
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        formatter: &dyn CellFormatter,
    ) {
        self.table.render(frame, area, theme, formatter);
        if let Some(details) = &self.details {
            details.render(frame, formatter, theme);
        }
        if let Some((dialog, _)) = &self.confirm {
            dialog.render(frame, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentLine, Partner, PartnerKind};
    use chrono::NaiveDate;

    fn documents() -> Vec<Document> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        (1..=3)
            .map(|i| {
                let number = format!("FT 2024/{}", i);
                let mut doc = Document::new(i, &number, DocumentKind::Sale, 1, date)
                    .with_status(DocumentStatus::Issued)
                    .with_line(DocumentLine::new("Bolt", 1.0, 2.0, 23.0));
                doc.partner = Some(Partner::new(1, &format!("Client {}", i), PartnerKind::Client));
                doc
            })
            .collect()
    }

    fn tab() -> DocumentsTab {
        let mut tab = DocumentsTab::new(DocumentKind::Sale, PageSize::default()).unwrap();
        tab.load(documents());
        tab
    }

    fn press(tab: &mut DocumentsTab, code: KeyCode) -> Option<AppMessage> {
        tab.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn mark_paid_asks_first() {
        let mut tab = tab();
        assert_eq!(tab.handle_key(KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT)), None);
        assert!(tab.captures_input());
        assert_eq!(
            press(&mut tab, KeyCode::Char('y')),
            Some(AppMessage::MarkPaid { number: "FT 2024/1".to_string() })
        );
        assert!(!tab.captures_input());
    }

    #[test]
    fn declined_confirmation_sends_nothing() {
        let mut tab = tab();
        tab.handle_key(KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT));
        assert_eq!(press(&mut tab, KeyCode::Esc), None);
        assert!(!tab.captures_input());
    }

    #[test]
    fn export_from_details_dialog() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Down);
        press(&mut tab, KeyCode::Enter);
        assert!(tab.captures_input());
        assert_eq!(
            press(&mut tab, KeyCode::Char('x')),
            Some(AppMessage::ExportInvoice { number: "FT 2024/2".to_string() })
        );
        press(&mut tab, KeyCode::Esc);
        assert!(!tab.captures_input());
    }

    #[test]
    fn update_replaces_matching_document() {
        let mut tab = tab();
        let paid = documents()[2].clone().with_status(DocumentStatus::Paid);
        assert!(tab.apply_update(&paid));
        let stored = &tab.table().browser().records()[2];
        assert_eq!(stored.status, DocumentStatus::Paid);

        let mut purchase = paid;
        purchase.kind = DocumentKind::Purchase;
        assert!(!tab.apply_update(&purchase));
    }

    #[test]
    fn partner_column_searches_joined_name() {
        let mut tab = tab();
        press(&mut tab, KeyCode::Char('/'));
        for c in "client 3".chars() {
            press(&mut tab, KeyCode::Char(c));
        }
        assert_eq!(tab.table().browser().filtered_count(), 1);
    }

    #[test]
    fn late_header_shows_reference_day() {
        let columns = columns(DocumentKind::Sale);
        let late = columns.iter().find(|c| c.id == "overdue").unwrap();
        assert_eq!(
            late.header.text(),
            format!("Late @{}", Local::now().format("%d/%m"))
        );
    }
}
