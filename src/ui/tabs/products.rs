//! Products tab

use crate::browser::{BrowserError, ColumnSpec, PageSize, Value};
use crate::models::Product;
use crate::ui::tabs::browser_tab::BrowserTab;

pub type ProductsTab = BrowserTab<Product>;

pub fn columns() -> Vec<ColumnSpec<Product>> {
    vec![
        ColumnSpec::field("sku", "SKU").with_width(10).fixed(),
        ColumnSpec::field("name", "Name").fixed(),
        ColumnSpec::field("category", "Category").with_width(12),
        ColumnSpec::field("unit", "Unit").with_width(5),
        ColumnSpec::field("purchase_price", "Cost").with_width(12),
        ColumnSpec::field("sale_price", "Price").with_width(12),
        ColumnSpec::field("vat_rate", "VAT %").with_width(6),
        ColumnSpec::computed("margin_percent", "Margin %", |p: &Product| {
            Value::from(p.margin_percent().map(|m| (m * 10.0).round() / 10.0))
        })
        .with_width(9),
        ColumnSpec::field("active", "Active").with_width(6),
    ]
}

pub fn new(page_size: PageSize) -> Result<ProductsTab, BrowserError> {
    Ok(BrowserTab::new(columns(), "name", page_size)?
        .with_row_style(|p: &Product, theme| (!p.active).then(|| theme.dim())))
}
