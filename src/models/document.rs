use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Partner;
use crate::browser::{Record, Value};

/// Sales documents go to clients, purchase documents come from suppliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Sale,
    Purchase,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sale => write!(f, "sale"),
            Self::Purchase => write!(f, "purchase"),
        }
    }
}

impl From<&str> for DocumentKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "purchase" => Self::Purchase,
            _ => Self::Sale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl Default for DocumentStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Issued => write!(f, "issued"),
            Self::Paid => write!(f, "paid"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl From<&str> for DocumentStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "issued" => Self::Issued,
            "paid" => Self::Paid,
            "cancelled" => Self::Cancelled,
            _ => Self::Draft,
        }
    }
}

/// Round to cents
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// One line of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// VAT rate in percent
    pub vat_rate: f64,
}

impl DocumentLine {
    pub fn new(description: &str, quantity: f64, unit_price: f64, vat_rate: f64) -> Self {
        Self {
            id: 0,
            product_id: None,
            description: description.to_string(),
            quantity,
            unit_price,
            vat_rate,
        }
    }

    pub fn for_product(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn net(&self) -> f64 {
        round_money(self.quantity * self.unit_price)
    }

    pub fn vat(&self) -> f64 {
        round_money(self.net() * self.vat_rate / 100.0)
    }

    pub fn gross(&self) -> f64 {
        self.net() + self.vat()
    }
}

/// A sales or purchase document with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub number: String,
    pub kind: DocumentKind,
    pub partner_id: i64,
    /// Joined partner, absent when the partner row is missing
    #[serde(default)]
    pub partner: Option<Partner>,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

impl Document {
    pub fn new(
        id: i64,
        number: &str,
        kind: DocumentKind,
        partner_id: i64,
        issue_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            number: number.to_string(),
            kind,
            partner_id,
            partner: None,
            issue_date,
            due_date: None,
            status: DocumentStatus::Draft,
            notes: None,
            lines: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_line(mut self, line: DocumentLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn net_total(&self) -> f64 {
        round_money(self.lines.iter().map(DocumentLine::net).sum())
    }

    pub fn vat_total(&self) -> f64 {
        round_money(self.lines.iter().map(DocumentLine::vat).sum())
    }

    pub fn gross_total(&self) -> f64 {
        round_money(self.net_total() + self.vat_total())
    }

    pub fn partner_name(&self) -> &str {
        self.partner.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }

    /// Issued, unpaid and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == DocumentStatus::Issued && self.due_date.is_some_and(|due| due < today)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, DocumentStatus::Draft | DocumentStatus::Issued)
    }
}

impl Record for Document {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => Value::Int(self.id),
            "number" => Value::from(self.number.as_str()),
            "kind" => Value::from(self.kind.to_string()),
            "status" => Value::from(self.status.to_string()),
            "issue_date" => Value::Date(self.issue_date),
            "due_date" => Value::from(self.due_date),
            "notes" => Value::from(self.notes.clone()),
            "line_count" => Value::Int(self.lines.len() as i64),
            "net_total" => Value::Money(self.net_total()),
            "vat_total" => Value::Money(self.vat_total()),
            "gross_total" => Value::Money(self.gross_total()),
            _ => Value::Null,
        }
    }

    fn relation(&self, name: &str) -> Option<&dyn Record> {
        match name {
            "partner" => self.partner.as_ref().map(|p| p as &dyn Record),
            _ => None,
        }
    }
}
