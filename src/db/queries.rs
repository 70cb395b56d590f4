//! Database query definitions

pub const INSERT_PRODUCT: &str = r#"
    INSERT INTO products (
        sku, name, category, unit, purchase_price, sale_price, vat_rate, active
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const INSERT_PARTNER: &str = r#"
    INSERT INTO partners (name, kind, tax_id, email, phone, address, city)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const INSERT_DOCUMENT: &str = r#"
    INSERT INTO documents (number, kind, partner_id, issue_date, due_date, status, notes)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const INSERT_DOCUMENT_LINE: &str = r#"
    INSERT INTO document_lines (
        document_id, product_id, description, quantity, unit_price, vat_rate
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const UPSERT_STOCK: &str = r#"
    INSERT INTO stock_levels (product_id, warehouse, quantity, reorder_level)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(product_id, warehouse) DO UPDATE SET
        quantity = excluded.quantity,
        reorder_level = excluded.reorder_level
"#;

pub const UPDATE_DOCUMENT_STATUS: &str = r#"
    UPDATE documents SET status = ?2 WHERE id = ?1
"#;

pub const SELECT_PRODUCTS: &str = r#"
    SELECT id, sku, name, category, unit, purchase_price, sale_price, vat_rate, active
    FROM products
    ORDER BY name
"#;

pub const SELECT_PARTNERS: &str = r#"
    SELECT id, name, kind, tax_id, email, phone, address, city
    FROM partners
    ORDER BY name
"#;

pub const SELECT_DOCUMENTS: &str = r#"
    SELECT id, number, kind, partner_id, issue_date, due_date, status, notes
    FROM documents
    ORDER BY issue_date DESC, number DESC
"#;

pub const SELECT_DOCUMENT_BY_NUMBER: &str = r#"
    SELECT id, number, kind, partner_id, issue_date, due_date, status, notes
    FROM documents
    WHERE number = ?1
"#;

pub const SELECT_DOCUMENT_LINES: &str = r#"
    SELECT id, document_id, product_id, description, quantity, unit_price, vat_rate
    FROM document_lines
    ORDER BY document_id, id
"#;

pub const SELECT_LINES_FOR_DOCUMENT: &str = r#"
    SELECT id, document_id, product_id, description, quantity, unit_price, vat_rate
    FROM document_lines
    WHERE document_id = ?1
    ORDER BY id
"#;

pub const SELECT_PARTNER_BY_ID: &str = r#"
    SELECT id, name, kind, tax_id, email, phone, address, city
    FROM partners
    WHERE id = ?1
"#;

pub const SELECT_STOCK: &str = r#"
    SELECT product_id, warehouse, quantity, reorder_level
    FROM stock_levels
    ORDER BY warehouse, product_id
"#;

pub const COUNT_PRODUCTS: &str = r#"
    SELECT COUNT(*) FROM products
"#;
