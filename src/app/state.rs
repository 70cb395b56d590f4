//! Application state management

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::db::{Database, Dataset};
use crate::invoice::{self, JsonLayoutRenderer};
use crate::models::{Company, Document, DocumentStatus};
use crate::utils::LocaleFormatter;

/// Requests sent from the UI to the state manager
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// Load every table again
    Reload,
    MarkPaid { number: String },
    ExportInvoice { number: String },
}

/// Results sent back to the UI
#[derive(Debug, Clone)]
pub enum DataEvent {
    Loaded(Box<Dataset>),
    DocumentUpdated(Box<Document>),
    InvoiceExported { number: String, path: PathBuf },
    Error(String),
}

/// Central application state
pub struct AppState {
    pub db: Database,
    pub company: Company,
    pub formatter: LocaleFormatter,
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn new(
        db: Database,
        company: Company,
        formatter: LocaleFormatter,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            db,
            company,
            formatter,
            export_dir,
        }
    }

    pub fn reload(&self) -> DataEvent {
        match self.db.load_dataset() {
            Ok(dataset) => {
                tracing::debug!(
                    "Loaded {} products, {} partners, {} documents, {} stock levels",
                    dataset.products.len(),
                    dataset.partners.len(),
                    dataset.document_count(),
                    dataset.stock.len()
                );
                DataEvent::Loaded(Box::new(dataset))
            }
            Err(e) => {
                tracing::error!("Failed to load data: {}", e);
                DataEvent::Error(format!("Load failed: {}", e))
            }
        }
    }

    pub fn mark_paid(&self, number: &str) -> DataEvent {
        let document = match self.db.find_document_by_number(number) {
            Ok(Some(document)) => document,
            Ok(None) => return DataEvent::Error(format!("No document {}", number)),
            Err(e) => {
                tracing::error!("Failed to look up {}: {}", number, e);
                return DataEvent::Error(format!("Lookup failed: {}", e));
            }
        };

        if !document.is_open() {
            return DataEvent::Error(format!("{} is already {}", number, document.status));
        }

        match self.db.set_document_status(document.id, DocumentStatus::Paid) {
            Ok(_) => {
                tracing::info!("Marked {} as paid", number);
                DataEvent::DocumentUpdated(Box::new(document.with_status(DocumentStatus::Paid)))
            }
            Err(e) => {
                tracing::error!("Failed to update {}: {}", number, e);
                DataEvent::Error(format!("Update failed: {}", e))
            }
        }
    }

    pub fn export_invoice(&self, number: &str) -> DataEvent {
        let document = match self.db.find_document_by_number(number) {
            Ok(Some(document)) => document,
            Ok(None) => return DataEvent::Error(format!("No document {}", number)),
            Err(e) => return DataEvent::Error(format!("Lookup failed: {}", e)),
        };

        match invoice::export_invoice(
            &document,
            &self.company,
            &self.formatter,
            &JsonLayoutRenderer::pretty(),
            &self.export_dir,
        ) {
            Ok(path) => DataEvent::InvoiceExported {
                number: number.to_string(),
                path,
            },
            Err(e) => {
                tracing::warn!("Invoice export for {} failed: {}", number, e);
                DataEvent::Error(format!("Export failed: {}", e))
            }
        }
    }

    pub fn handle(&self, msg: AppMessage) -> DataEvent {
        match msg {
            AppMessage::Reload => self.reload(),
            AppMessage::MarkPaid { number } => self.mark_paid(&number),
            AppMessage::ExportInvoice { number } => self.export_invoice(&number),
        }
    }
}

/// Run the state manager task
pub async fn run_state_manager(
    state: Arc<AppState>,
    mut rx: mpsc::Receiver<AppMessage>,
    event_tx: mpsc::UnboundedSender<DataEvent>,
) {
    tracing::info!("State manager started");

    while let Some(msg) = rx.recv().await {
        tracing::debug!("State manager received {:?}", msg);
        let event = state.handle(msg);
        if event_tx.send(event).is_err() {
            break;
        }
    }

    tracing::info!("State manager stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentKind, DocumentLine, Partner, PartnerKind};
    use chrono::NaiveDate;

    fn state() -> AppState {
        let db = Database::open(":memory:").unwrap();
        let client = db
            .insert_partner(&Partner::new(0, "Acme Lda", PartnerKind::Client))
            .unwrap();
        db.insert_document(
            &Document::new(
                0,
                "FT 2024/1",
                DocumentKind::Sale,
                client,
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            )
            .with_status(DocumentStatus::Issued)
            .with_line(DocumentLine::new("Bolt", 10.0, 1.2, 23.0)),
        )
        .unwrap();

        let export_dir =
            std::env::temp_dir().join(format!("tradedesk-state-{}", std::process::id()));
        AppState::new(db, Company::default(), LocaleFormatter::default(), export_dir)
    }

    #[test]
    fn reload_returns_dataset() {
        let DataEvent::Loaded(dataset) = state().handle(AppMessage::Reload) else {
            panic!("expected a dataset");
        };
        assert_eq!(dataset.sales.len(), 1);
    }

    #[test]
    fn mark_paid_only_once() {
        let state = state();
        let number = "FT 2024/1".to_string();

        let message = AppMessage::MarkPaid {
            number: number.clone(),
        };
        let DataEvent::DocumentUpdated(doc) = state.handle(message) else {
            panic!("expected an update");
        };
        assert_eq!(doc.status, DocumentStatus::Paid);
        assert_eq!(doc.partner_name(), "Acme Lda");

        assert!(matches!(
            state.handle(AppMessage::MarkPaid { number }),
            DataEvent::Error(_)
        ));
    }

    #[test]
    fn unknown_number_is_an_error() {
        assert!(matches!(
            state().handle(AppMessage::ExportInvoice { number: "nope".to_string() }),
            DataEvent::Error(_)
        ));
    }

    #[tokio::test]
    async fn manager_answers_each_message() {
        let state = Arc::new(state());
        let (tx, rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_state_manager(state, rx, event_tx));

        tx.send(AppMessage::Reload).await.unwrap();
        assert!(matches!(event_rx.recv().await, Some(DataEvent::Loaded(_))));

        drop(tx);
        handle.await.unwrap();
    }
}
