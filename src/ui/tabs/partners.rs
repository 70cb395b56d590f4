//! Partners tab

use crate::browser::{BrowserError, ColumnSpec, PageSize};
use crate::models::Partner;
use crate::ui::tabs::browser_tab::BrowserTab;

pub type PartnersTab = BrowserTab<Partner>;

pub fn columns() -> Vec<ColumnSpec<Partner>> {
    vec![
        ColumnSpec::field("name", "Name").fixed(),
        ColumnSpec::field("kind", "Kind").with_width(9),
        ColumnSpec::field("tax_id", "Tax ID").with_width(13),
        ColumnSpec::field("email", "Email"),
        ColumnSpec::field("phone", "Phone").with_width(16).not_sortable(),
        ColumnSpec::field("city", "City").with_width(10),
    ]
}

pub fn new(page_size: PageSize) -> Result<PartnersTab, BrowserError> {
    BrowserTab::new(columns(), "name", page_size)
}
