pub mod columns;
pub mod confirm;
pub mod document_details;
