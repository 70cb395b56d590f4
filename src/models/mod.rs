pub mod company;
pub mod document;
pub mod partner;
pub mod product;
pub mod stock;

pub use company::Company;
pub use document::{round_money, Document, DocumentKind, DocumentLine, DocumentStatus};
pub use partner::{Partner, PartnerKind};
pub use product::Product;
pub use stock::StockLevel;
