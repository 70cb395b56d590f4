//! Stock levels tab

use crate::browser::{BrowserError, ColumnSpec, PageSize};
use crate::models::StockLevel;
use crate::ui::tabs::browser_tab::BrowserTab;

pub type StockTab = BrowserTab<StockLevel>;

pub fn columns() -> Vec<ColumnSpec<StockLevel>> {
    vec![
        ColumnSpec::path("sku", "SKU", "product.sku").with_width(10).fixed(),
        ColumnSpec::path("product", "Product", "product.name"),
        ColumnSpec::field("warehouse", "Warehouse").with_width(10),
        ColumnSpec::field("quantity", "Qty").with_width(8),
        ColumnSpec::field("reorder_level", "Reorder at").with_width(10),
        ColumnSpec::field("value", "Value").with_width(12),
        ColumnSpec::field("low", "Low").with_width(4),
    ]
}

pub fn new(page_size: PageSize) -> Result<StockTab, BrowserError> {
    Ok(BrowserTab::new(columns(), "product", page_size)?
        .with_row_style(|level: &StockLevel, theme| level.is_low().then(|| theme.error())))
}
