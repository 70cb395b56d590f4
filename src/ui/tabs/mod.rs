pub mod browser_tab;
pub mod documents;
pub mod partners;
pub mod products;
pub mod stock;
