//! Invoice layout tree handed to a renderer

use serde::Serialize;

use super::data::InvoiceData;
use crate::browser::{CellFormatter, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    Title,
    Heading,
    Body,
    Muted,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub header: String,
    /// Relative width
    pub weight: u16,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode {
    Page { children: Vec<LayoutNode> },
    Column { children: Vec<LayoutNode> },
    Row { children: Vec<LayoutNode> },
    Text { text: String, style: TextStyle, align: Align },
    Table { columns: Vec<TableColumn>, rows: Vec<Vec<String>> },
    Spacer { height: u16 },
}

impl LayoutNode {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text {
            text: text.into(),
            style,
            align: Align::Left,
        }
    }

    pub fn right(text: impl Into<String>, style: TextStyle) -> Self {
        Self::Text {
            text: text.into(),
            style,
            align: Align::Right,
        }
    }

    pub fn children(&self) -> &[LayoutNode] {
        match self {
            Self::Page { children } | Self::Column { children } | Self::Row { children } => {
                children
            }
            _ => &[],
        }
    }

    /// All text in document order, table cells included
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Text { text, .. } => out.push(text),
            Self::Table { columns, rows } => {
                out.extend(columns.iter().map(|c| c.header.as_str()));
                for row in rows {
                    out.extend(row.iter().map(String::as_str));
                }
            }
            _ => {
                for child in self.children() {
                    child.collect_texts(out);
                }
            }
        }
    }
}

fn column(header: &str, weight: u16, align: Align) -> TableColumn {
    TableColumn {
        header: header.to_string(),
        weight,
        align,
    }
}

fn non_empty(lines: &[&str]) -> Vec<LayoutNode> {
    lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| LayoutNode::text(*l, TextStyle::Body))
        .collect()
}

/// Build the page for one invoice
pub fn build_layout(invoice: &InvoiceData, formatter: &dyn CellFormatter) -> LayoutNode {
    let money = |amount: f64| formatter.format(&Value::Money(amount));
    let number = |n: f64| formatter.format(&Value::Float(n));
    let date = |d| formatter.format(&Value::Date(d));

    let company = &invoice.company;
    let mut issuer = vec![LayoutNode::text(company.name.as_str(), TextStyle::Heading)];
    issuer.extend(non_empty(&[
        company.address.as_str(),
        company.city.as_str(),
        company.email.as_str(),
        company.phone.as_str(),
    ]));
    if !company.tax_id.is_empty() {
        issuer.push(LayoutNode::text(format!("Tax ID: {}", company.tax_id), TextStyle::Muted));
    }

    let mut meta = vec![
        LayoutNode::right(format!("Invoice {}", invoice.number), TextStyle::Title),
        LayoutNode::right(format!("Date: {}", date(invoice.issue_date)), TextStyle::Body),
    ];
    if let Some(due) = invoice.due_date {
        meta.push(LayoutNode::right(format!("Due: {}", date(due)), TextStyle::Body));
    }

    let customer = &invoice.customer;
    let mut bill_to = vec![
        LayoutNode::text("Bill to", TextStyle::Muted),
        LayoutNode::text(customer.name.as_str(), TextStyle::Strong),
    ];
    bill_to.extend(non_empty(&[
        customer.address.as_deref().unwrap_or(""),
        customer.city.as_deref().unwrap_or(""),
    ]));
    if let Some(tax_id) = &customer.tax_id {
        bill_to.push(LayoutNode::text(format!("Tax ID: {}", tax_id), TextStyle::Muted));
    }

    let lines = LayoutNode::Table {
        columns: vec![
            column("Description", 6, Align::Left),
            column("Qty", 1, Align::Right),
            column("Unit price", 2, Align::Right),
            column("VAT %", 1, Align::Right),
            column("Net", 2, Align::Right),
        ],
        rows: invoice
            .lines
            .iter()
            .map(|l| {
                vec![
                    l.description.clone(),
                    number(l.quantity),
                    money(l.unit_price),
                    number(l.vat_rate),
                    money(l.net),
                ]
            })
            .collect(),
    };

    let vat = LayoutNode::Table {
        columns: vec![
            column("VAT %", 1, Align::Right),
            column("Base", 2, Align::Right),
            column("VAT", 2, Align::Right),
        ],
        rows: invoice
            .vat_breakdown
            .iter()
            .map(|v| vec![number(v.rate), money(v.base), money(v.amount)])
            .collect(),
    };

    let totals = LayoutNode::Column {
        children: vec![
            LayoutNode::right(format!("Net: {}", money(invoice.net_total)), TextStyle::Body),
            LayoutNode::right(format!("VAT: {}", money(invoice.vat_total)), TextStyle::Body),
            LayoutNode::right(format!("Total: {}", money(invoice.gross_total)), TextStyle::Strong),
        ],
    };

    let mut page = vec![
        LayoutNode::Row {
            children: vec![
                LayoutNode::Column { children: issuer },
                LayoutNode::Column { children: meta },
            ],
        },
        LayoutNode::Spacer { height: 2 },
        LayoutNode::Column { children: bill_to },
        LayoutNode::Spacer { height: 1 },
        lines,
        LayoutNode::Spacer { height: 1 },
        LayoutNode::Row {
            children: vec![vat, totals],
        },
    ];

    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.is_empty()) {
        page.push(LayoutNode::Spacer { height: 1 });
        page.push(LayoutNode::text(notes, TextStyle::Muted));
    }
    if !company.iban.is_empty() {
        page.push(LayoutNode::text(format!("IBAN: {}", company.iban), TextStyle::Muted));
    }

    LayoutNode::Page { children: page }
}
