//! SQLite database implementation

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::models::{
    Document, DocumentKind, DocumentLine, DocumentStatus, Partner, PartnerKind, Product,
    StockLevel,
};

use super::{queries, schema};

/// Dates are stored as ISO text
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything the dashboard shows, loaded in one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub partners: Vec<Partner>,
    pub sales: Vec<Document>,
    pub purchases: Vec<Document>,
    pub stock: Vec<StockLevel>,
}

impl Dataset {
    pub fn document_count(&self) -> usize {
        self.sales.len() + self.purchases.len()
    }
}

/// SQLite database wrapper
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create database at the specified path
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let conn = Connection::open(path)?;
            conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
            conn
        };

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(schema::CREATE_TABLES)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![schema::SCHEMA_VERSION],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }

    /// True when no products have been stored yet
    pub fn is_empty(&self) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(queries::COUNT_PRODUCTS, [], |row| row.get(0))?;
        Ok(count == 0)
    }

    /// Insert a product, returning its new id
    pub fn insert_product(&self, product: &Product) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            queries::INSERT_PRODUCT,
            params![
                product.sku,
                product.name,
                product.category,
                product.unit,
                product.purchase_price,
                product.sale_price,
                product.vat_rate,
                product.active,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a partner, returning its new id
    pub fn insert_partner(&self, partner: &Partner) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            queries::INSERT_PARTNER,
            params![
                partner.name,
                partner.kind.to_string(),
                partner.tax_id,
                partner.email,
                partner.phone,
                partner.address,
                partner.city,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a document and its lines in one transaction
    pub fn insert_document(&self, document: &Document) -> Result<i64> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            queries::INSERT_DOCUMENT,
            params![
                document.number,
                document.kind.to_string(),
                document.partner_id,
                document.issue_date.format(DATE_FORMAT).to_string(),
                document.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                document.status.to_string(),
                document.notes,
            ],
        )?;
        let document_id = tx.last_insert_rowid();

        for line in &document.lines {
            tx.execute(
                queries::INSERT_DOCUMENT_LINE,
                params![
                    document_id,
                    line.product_id,
                    line.description,
                    line.quantity,
                    line.unit_price,
                    line.vat_rate,
                ],
            )?;
        }

        tx.commit()?;
        Ok(document_id)
    }

    /// Insert or replace the stock level of a product in a warehouse
    pub fn upsert_stock(&self, level: &StockLevel) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            queries::UPSERT_STOCK,
            params![
                level.product_id,
                level.warehouse,
                level.quantity,
                level.reorder_level,
            ],
        )?;
        Ok(())
    }

    /// Change a document's status. Returns false when no such document exists.
    pub fn set_document_status(&self, document_id: i64, status: DocumentStatus) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            queries::UPDATE_DOCUMENT_STATUS,
            params![document_id, status.to_string()],
        )?;
        tracing::debug!("Document {} set to {} ({} row)", document_id, status, changed);
        Ok(changed > 0)
    }

    /// Load all products
    pub fn select_products(&self) -> Result<Vec<Product>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(queries::SELECT_PRODUCTS)?;
        let rows = stmt.query_map([], |row| Ok(Self::row_to_product(row)))?;

        let mut products = Vec::new();
        for row in rows {
            products.push(row?);
        }
        Ok(products)
    }

    /// Load all partners
    pub fn select_partners(&self) -> Result<Vec<Partner>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(queries::SELECT_PARTNERS)?;
        let rows = stmt.query_map([], |row| Ok(Self::row_to_partner(row)))?;

        let mut partners = Vec::new();
        for row in rows {
            partners.push(row?);
        }
        Ok(partners)
    }

    /// Load documents with their lines and partner joined in
    pub fn select_documents(&self, kind: Option<DocumentKind>) -> Result<Vec<Document>> {
        let partners: HashMap<i64, Partner> = self
            .select_partners()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let conn = self.conn()?;

        let mut lines: HashMap<i64, Vec<DocumentLine>> = HashMap::new();
        {
            let mut stmt = conn.prepare(queries::SELECT_DOCUMENT_LINES)?;
            let rows = stmt.query_map([], |row| Ok(Self::row_to_line(row)))?;
            for row in rows {
                let (document_id, line) = row?;
                lines.entry(document_id).or_default().push(line);
            }
        }

        let mut stmt = conn.prepare(queries::SELECT_DOCUMENTS)?;
        let rows = stmt.query_map([], |row| Ok(Self::row_to_document(row)))?;

        let mut documents = Vec::new();
        for row in rows {
            let mut document = row?;
            if kind.is_some_and(|k| k != document.kind) {
                continue;
            }
            document.partner = partners.get(&document.partner_id).cloned();
            document.lines = lines.remove(&document.id).unwrap_or_default();
            documents.push(document);
        }
        Ok(documents)
    }

    /// Look a document up by its number, with lines and partner joined in
    pub fn find_document_by_number(&self, number: &str) -> Result<Option<Document>> {
        let conn = self.conn()?;

        let document = conn
            .query_row(queries::SELECT_DOCUMENT_BY_NUMBER, params![number], |row| {
                Ok(Self::row_to_document(row))
            })
            .optional()?;
        let Some(mut document) = document else {
            return Ok(None);
        };

        document.partner = conn
            .query_row(queries::SELECT_PARTNER_BY_ID, params![document.partner_id], |row| {
                Ok(Self::row_to_partner(row))
            })
            .optional()?;

        let mut stmt = conn.prepare(queries::SELECT_LINES_FOR_DOCUMENT)?;
        let rows = stmt.query_map(params![document.id], |row| Ok(Self::row_to_line(row)))?;
        for row in rows {
            let (_, line) = row?;
            document.lines.push(line);
        }

        Ok(Some(document))
    }

    /// Load stock levels with their product joined in
    pub fn select_stock(&self) -> Result<Vec<StockLevel>> {
        let products: HashMap<i64, Product> = self
            .select_products()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let conn = self.conn()?;
        let mut stmt = conn.prepare(queries::SELECT_STOCK)?;
        let rows = stmt.query_map([], |row| Ok(Self::row_to_stock(row)))?;

        let mut levels = Vec::new();
        for row in rows {
            let mut level = row?;
            level.product = products.get(&level.product_id).cloned();
            levels.push(level);
        }
        Ok(levels)
    }

    /// Load every table the dashboard shows
    pub fn load_dataset(&self) -> Result<Dataset> {
        let mut sales = Vec::new();
        let mut purchases = Vec::new();
        for document in self.select_documents(None)? {
            match document.kind {
                DocumentKind::Sale => sales.push(document),
                DocumentKind::Purchase => purchases.push(document),
            }
        }

        Ok(Dataset {
            products: self.select_products()?,
            partners: self.select_partners()?,
            sales,
            purchases,
            stock: self.select_stock()?,
        })
    }

    fn row_to_product(row: &Row) -> Product {
        Product {
            id: row.get(0).unwrap_or_default(),
            sku: row.get(1).unwrap_or_default(),
            name: row.get(2).unwrap_or_default(),
            category: row.get(3).unwrap_or_default(),
            unit: row.get(4).unwrap_or_default(),
            purchase_price: row.get(5).unwrap_or_default(),
            sale_price: row.get(6).unwrap_or_default(),
            vat_rate: row.get(7).unwrap_or_default(),
            active: row.get(8).unwrap_or(true),
        }
    }

    fn row_to_partner(row: &Row) -> Partner {
        let kind: String = row.get(2).unwrap_or_default();
        Partner {
            id: row.get(0).unwrap_or_default(),
            name: row.get(1).unwrap_or_default(),
            kind: PartnerKind::from(kind.as_str()),
            tax_id: row.get(3).unwrap_or_default(),
            email: row.get(4).unwrap_or_default(),
            phone: row.get(5).unwrap_or_default(),
            address: row.get(6).unwrap_or_default(),
            city: row.get(7).unwrap_or_default(),
        }
    }

    fn row_to_document(row: &Row) -> Document {
        let kind: String = row.get(2).unwrap_or_default();
        let issue_date: String = row.get(4).unwrap_or_default();
        let due_date: Option<String> = row.get(5).unwrap_or_default();
        let status: String = row.get(6).unwrap_or_default();

        Document {
            id: row.get(0).unwrap_or_default(),
            number: row.get(1).unwrap_or_default(),
            kind: DocumentKind::from(kind.as_str()),
            partner_id: row.get(3).unwrap_or_default(),
            partner: None,
            issue_date: parse_date(&issue_date).unwrap_or_default(),
            due_date: due_date.as_deref().and_then(parse_date),
            status: DocumentStatus::from(status.as_str()),
            notes: row.get(7).unwrap_or_default(),
            lines: Vec::new(),
        }
    }

    fn row_to_line(row: &Row) -> (i64, DocumentLine) {
        let document_id: i64 = row.get(1).unwrap_or_default();
        let line = DocumentLine {
            id: row.get(0).unwrap_or_default(),
            product_id: row.get(2).unwrap_or_default(),
            description: row.get(3).unwrap_or_default(),
            quantity: row.get(4).unwrap_or_default(),
            unit_price: row.get(5).unwrap_or_default(),
            vat_rate: row.get(6).unwrap_or_default(),
        };
        (document_id, line)
    }

    fn row_to_stock(row: &Row) -> StockLevel {
        StockLevel {
            product_id: row.get(0).unwrap_or_default(),
            product: None,
            warehouse: row.get(1).unwrap_or_default(),
            quantity: row.get(2).unwrap_or_default(),
            reorder_level: row.get(3).unwrap_or_default(),
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn db_with_documents() -> (Database, i64, i64) {
        let db = Database::open(":memory:").unwrap();
        let client = db
            .insert_partner(
                &Partner::new(0, "Acme Lda", PartnerKind::Client).with_tax_id("PT500100200"),
            )
            .unwrap();
        let supplier = db
            .insert_partner(&Partner::new(0, "Parts Co", PartnerKind::Supplier))
            .unwrap();
        let bolt = db
            .insert_product(&Product::new(0, "B-1", "Bolt").with_prices(0.5, 1.2))
            .unwrap();

        db.insert_document(
            &Document::new(0, "FT 2024/1", DocumentKind::Sale, client, date(2024, 3, 1))
                .with_due_date(date(2024, 3, 31))
                .with_status(DocumentStatus::Issued)
                .with_line(DocumentLine::new("Bolt", 10.0, 1.2, 23.0).for_product(bolt)),
        )
        .unwrap();
        db.insert_document(
            &Document::new(0, "FC 2024/1", DocumentKind::Purchase, supplier, date(2024, 2, 1))
                .with_line(DocumentLine::new("Bolt", 100.0, 0.5, 23.0).for_product(bolt)),
        )
        .unwrap();

        (db, client, bolt)
    }

    #[test]
    fn new_database_is_empty() {
        let db = Database::open(":memory:").unwrap();
        assert!(db.is_empty().unwrap());
        assert_eq!(db.load_dataset().unwrap(), Dataset::default());
    }

    #[test]
    fn documents_load_with_lines_and_partner() {
        let (db, client, _) = db_with_documents();

        let sales = db.select_documents(Some(DocumentKind::Sale)).unwrap();
        assert_eq!(sales.len(), 1);
        let sale = &sales[0];
        assert_eq!(sale.partner_id, client);
        assert_eq!(sale.partner_name(), "Acme Lda");
        assert_eq!(sale.due_date, Some(date(2024, 3, 31)));
        assert_eq!(sale.status, DocumentStatus::Issued);
        assert_eq!(sale.lines.len(), 1);
        assert_eq!(sale.net_total(), 12.0);
    }

    #[test]
    fn dataset_splits_sales_and_purchases() {
        let (db, _, _) = db_with_documents();
        let dataset = db.load_dataset().unwrap();
        assert_eq!(dataset.sales.len(), 1);
        assert_eq!(dataset.purchases.len(), 1);
        assert_eq!(dataset.purchases[0].number, "FC 2024/1");
        assert_eq!(dataset.document_count(), 2);
    }

    #[test]
    fn status_update_persists() {
        let (db, _, _) = db_with_documents();
        let sale = db.find_document_by_number("FT 2024/1").unwrap().unwrap();

        assert!(db.set_document_status(sale.id, DocumentStatus::Paid).unwrap());
        let reloaded = db.find_document_by_number("FT 2024/1").unwrap().unwrap();
        assert_eq!(reloaded.status, DocumentStatus::Paid);
        assert_eq!(reloaded.lines.len(), 1);

        assert!(!db.set_document_status(9999, DocumentStatus::Paid).unwrap());
    }

    #[test]
    fn unknown_document_number_is_none() {
        let (db, _, _) = db_with_documents();
        assert!(db.find_document_by_number("nope").unwrap().is_none());
    }

    #[test]
    fn stock_upsert_replaces_and_joins_product() {
        let (db, _, bolt) = db_with_documents();
        db.upsert_stock(&StockLevel::new(bolt, "Main", 10.0)).unwrap();
        db.upsert_stock(&StockLevel::new(bolt, "Main", 4.0).with_reorder_level(5.0))
            .unwrap();

        let stock = db.select_stock().unwrap();
        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].quantity, 4.0);
        assert!(stock[0].is_low());
        assert_eq!(stock[0].product.as_ref().map(|p| p.sku.as_str()), Some("B-1"));
    }
}
