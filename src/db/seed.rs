//! Demo data for a fresh database

use anyhow::Result;
use chrono::{Days, NaiveDate};

use crate::models::{
    Document, DocumentKind, DocumentLine, DocumentStatus, Partner, PartnerKind, Product,
    StockLevel,
};

use super::Database;

const CATEGORIES: &[&str] = &["Fasteners", "Tools", "Electrical", "Plumbing", "Paint"];
const WAREHOUSES: &[&str] = &["Lisbon", "Porto"];
const CITIES: &[&str] = &["Lisbon", "Porto", "Braga", "Coimbra", "Faro", "Aveiro"];

const PRODUCT_NAMES: &[&str] = &[
    "Hex bolt M8", "Hex nut M8", "Washer 8mm", "Wood screw 4x40", "Anchor plug 6mm",
    "Claw hammer", "Screwdriver set", "Adjustable wrench", "Tape measure 5m", "Utility knife",
    "Cable 2.5mm 100m", "Wall socket", "Light switch", "LED bulb E27", "Junction box",
    "PVC pipe 40mm", "Elbow fitting 40mm", "Ball valve 1/2", "Teflon tape", "Sink trap",
    "Wall paint white 15L", "Primer 5L", "Roller 22cm", "Brush 50mm", "Masking tape",
];

const CLIENT_NAMES: &[&str] = &[
    "Acme Lda", "Construtora Norte", "Obras & Filhos", "Casa Nova SA", "Reformas Sul",
    "Atlantico Build", "Ferragens Central", "Mestre Obras", "Lar Doce Lar", "Engenho Lda",
    "Ponte Alta", "Bairro Verde",
];

const SUPPLIER_NAMES: &[&str] = &[
    "Parts Co", "Iberia Tools", "EuroFix GmbH", "Tintas Lusas", "Hidro Supply", "Volt Trade",
];

const BOTH_NAMES: &[&str] = &["Trade Partners Lda", "Grossista Uniao"];

/// Fill the database with a deterministic demo company, dating documents relative to `today`
pub fn seed_demo(db: &Database, today: NaiveDate) -> Result<()> {
    let mut product_ids = Vec::new();
    for (i, name) in PRODUCT_NAMES.iter().enumerate() {
        let purchase = 0.4 + (i as f64 * 1.7) % 35.0;
        let sale = (purchase * 1.45 * 100.0).round() / 100.0;
        let mut product = Product::new(0, &format!("SKU-{:04}", 1000 + i), name)
            .with_prices((purchase * 100.0).round() / 100.0, sale)
            .with_vat_rate(if i % 7 == 3 { 13.0 } else { 23.0 });
        // Leave a few uncategorized so empty cells show up
        if i % 9 != 8 {
            product = product.with_category(CATEGORIES[i / 5 % CATEGORIES.len()]);
        }
        if name.contains("100m") || name.contains("15L") {
            product = product.with_unit("roll");
        }
        product_ids.push(db.insert_product(&product)?);
    }

    let mut clients = Vec::new();
    let mut suppliers = Vec::new();
    let partners = CLIENT_NAMES
        .iter()
        .map(|n| (n, PartnerKind::Client))
        .chain(SUPPLIER_NAMES.iter().map(|n| (n, PartnerKind::Supplier)))
        .chain(BOTH_NAMES.iter().map(|n| (n, PartnerKind::Both)));
    for (i, (name, kind)) in partners.enumerate() {
        let tax_id = format!("PT5{:08}", 1_000_000 + i * 7919);
        let mut partner = Partner::new(0, name, kind).with_tax_id(&tax_id);
        if i % 4 != 2 {
            let slug: String = name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            let phone = format!("+351 21 {:03} {:04}", 100 + i, 1000 + i * 37);
            partner = partner.with_contact(&format!("info@{}.pt", slug), &phone);
        }
        if i % 5 != 4 {
            let street = format!("Rua {} {}", i + 1, name);
            partner = partner.with_address(&street, CITIES[i % CITIES.len()]);
        }

        let id = db.insert_partner(&partner)?;
        if kind.is_client() {
            clients.push(id);
        }
        if kind.is_supplier() {
            suppliers.push(id);
        }
    }

    for i in 0..60usize {
        let issued = today - Days::new((i as u64 * 3) % 120);
        let status = match i % 6 {
            0 => DocumentStatus::Draft,
            1 | 2 => DocumentStatus::Issued,
            5 if i % 12 == 5 => DocumentStatus::Cancelled,
            _ => DocumentStatus::Paid,
        };
        let mut document = Document::new(
            0,
            &format!("FT {}/{}", issued.format("%Y"), i + 1),
            DocumentKind::Sale,
            clients[i % clients.len()],
            issued,
        )
        .with_status(status)
        .with_due_date(issued + Days::new(30));
        document = with_lines(document, &product_ids, i, 1.45);
        db.insert_document(&document)?;
    }

    for i in 0..24usize {
        let issued = today - Days::new((i as u64 * 5) % 150);
        let status = if i % 4 == 0 { DocumentStatus::Issued } else { DocumentStatus::Paid };
        let mut document = Document::new(
            0,
            &format!("FC {}/{}", issued.format("%Y"), i + 1),
            DocumentKind::Purchase,
            suppliers[i % suppliers.len()],
            issued,
        )
        .with_status(status)
        .with_due_date(issued + Days::new(60));
        document = with_lines(document, &product_ids, i * 2, 1.0);
        db.insert_document(&document)?;
    }

    for (i, product_id) in product_ids.iter().enumerate() {
        for (w, warehouse) in WAREHOUSES.iter().enumerate() {
            if (i + w) % 4 == 3 {
                continue;
            }
            let quantity = ((i * 37 + w * 11) % 180) as f64;
            let level = StockLevel::new(*product_id, warehouse, quantity).with_reorder_level(20.0);
            db.upsert_stock(&level)?;
        }
    }

    tracing::info!(
        "Seeded demo data: {} products, {} partners",
        product_ids.len(),
        clients.len() + suppliers.len()
    );
    Ok(())
}

fn with_lines(mut document: Document, product_ids: &[i64], seed: usize, markup: f64) -> Document {
    let count = 1 + seed % 4;
    for n in 0..count {
        let index = (seed * 7 + n * 3) % product_ids.len();
        let base = 0.4 + (index as f64 * 1.7) % 35.0;
        let price = (base * markup * 100.0).round() / 100.0;
        let vat = if index % 7 == 3 { 13.0 } else { 23.0 };
        let quantity = (1 + (seed + n) % 12) as f64;
        document = document.with_line(
            DocumentLine::new(PRODUCT_NAMES[index], quantity, price, vat)
                .for_product(product_ids[index]),
        );
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_fills_every_table() {
        let db = Database::open(":memory:").unwrap();
        seed_demo(&db, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()).unwrap();

        let dataset = db.load_dataset().unwrap();
        assert_eq!(dataset.products.len(), PRODUCT_NAMES.len());
        assert_eq!(
            dataset.partners.len(),
            CLIENT_NAMES.len() + SUPPLIER_NAMES.len() + BOTH_NAMES.len()
        );
        assert_eq!(dataset.sales.len(), 60);
        assert_eq!(dataset.purchases.len(), 24);
        assert!(!dataset.stock.is_empty());
        assert!(dataset.sales.iter().all(|d| d.partner.is_some() && !d.lines.is_empty()));
        assert!(dataset.products.iter().any(|p| p.category.is_none()));
    }
}
