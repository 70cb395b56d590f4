//! Invoice data assembled from a sale document

use chrono::NaiveDate;
use serde::Serialize;

use super::InvoiceError;
use crate::models::{round_money, Company, Document, DocumentKind, DocumentStatus, Partner};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub vat_rate: f64,
    pub net: f64,
    pub vat: f64,
    pub gross: f64,
}

/// Taxable base and tax for one VAT rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VatLine {
    pub rate: f64,
    pub base: f64,
    pub amount: f64,
}

/// Everything printed on an invoice, totals already computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceData {
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: DocumentStatus,
    pub company: Company,
    pub customer: Partner,
    pub lines: Vec<InvoiceLine>,
    /// Ordered by rate, ascending
    pub vat_breakdown: Vec<VatLine>,
    pub net_total: f64,
    pub vat_total: f64,
    pub gross_total: f64,
    pub notes: Option<String>,
}

impl InvoiceData {
    pub fn from_document(document: &Document, company: &Company) -> Result<Self, InvoiceError> {
        if document.kind != DocumentKind::Sale {
            return Err(InvoiceError::NotASale(document.number.clone()));
        }
        if document.status == DocumentStatus::Cancelled {
            return Err(InvoiceError::Cancelled(document.number.clone()));
        }
        let customer = document
            .partner
            .clone()
            .ok_or_else(|| InvoiceError::MissingPartner(document.number.clone()))?;
        if document.lines.is_empty() {
            return Err(InvoiceError::NoLines(document.number.clone()));
        }

        let lines: Vec<InvoiceLine> = document
            .lines
            .iter()
            .map(|line| InvoiceLine {
                description: line.description.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                vat_rate: line.vat_rate,
                net: line.net(),
                vat: line.vat(),
                gross: line.gross(),
            })
            .collect();

        let mut vat_breakdown: Vec<VatLine> = Vec::new();
        for line in &lines {
            match vat_breakdown.iter_mut().find(|v| v.rate == line.vat_rate) {
                Some(entry) => {
                    entry.base = round_money(entry.base + line.net);
                    entry.amount = round_money(entry.amount + line.vat);
                }
                None => vat_breakdown.push(VatLine {
                    rate: line.vat_rate,
                    base: line.net,
                    amount: line.vat,
                }),
            }
        }
        vat_breakdown.sort_by(|a, b| a.rate.total_cmp(&b.rate));

        Ok(Self {
            number: document.number.clone(),
            issue_date: document.issue_date,
            due_date: document.due_date,
            status: document.status,
            company: company.clone(),
            customer,
            lines,
            vat_breakdown,
            net_total: document.net_total(),
            vat_total: document.vat_total(),
            gross_total: document.gross_total(),
            notes: document.notes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentLine, PartnerKind};
    use pretty_assertions::assert_eq;

    fn sale() -> Document {
        let mut doc = Document::new(
            1,
            "FT 2024/7",
            DocumentKind::Sale,
            3,
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        )
        .with_line(DocumentLine::new("Bolts", 4.0, 2.5, 23.0))
        .with_line(DocumentLine::new("Manual", 1.0, 10.0, 6.0))
        .with_line(DocumentLine::new("Nuts", 2.0, 5.0, 23.0));
        doc.partner = Some(Partner::new(3, "Acme Lda", PartnerKind::Client));
        doc
    }

    #[test]
    fn vat_breakdown_groups_by_rate() {
        let invoice = InvoiceData::from_document(&sale(), &Company::default()).unwrap();
        assert_eq!(
            invoice.vat_breakdown,
            vec![
                VatLine { rate: 6.0, base: 10.0, amount: 0.6 },
                VatLine { rate: 23.0, base: 20.0, amount: 4.6 },
            ]
        );
        assert_eq!(invoice.net_total, 30.0);
        assert_eq!(invoice.vat_total, 5.2);
        assert_eq!(invoice.gross_total, 35.2);
        assert_eq!(invoice.customer.name, "Acme Lda");
    }

    #[test]
    fn purchases_are_rejected() {
        let mut doc = sale();
        doc.kind = DocumentKind::Purchase;
        let err = InvoiceData::from_document(&doc, &Company::default()).unwrap_err();
        assert_eq!(err.to_string(), "FT 2024/7 is not a sales document");
    }

    #[test]
    fn needs_partner_and_lines() {
        let mut doc = sale();
        doc.partner = None;
        assert!(matches!(
            InvoiceData::from_document(&doc, &Company::default()),
            Err(InvoiceError::MissingPartner(_))
        ));

        let mut doc = sale();
        doc.lines.clear();
        assert!(matches!(
            InvoiceData::from_document(&doc, &Company::default()),
            Err(InvoiceError::NoLines(_))
        ));
    }

    #[test]
    fn cancelled_documents_are_rejected() {
        let doc = sale().with_status(DocumentStatus::Cancelled);
        assert!(matches!(
            InvoiceData::from_document(&doc, &Company::default()),
            Err(InvoiceError::Cancelled(_))
        ));
    }
}
