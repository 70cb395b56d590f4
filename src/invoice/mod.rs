//! Invoice export: document to data, data to layout, layout to bytes

pub mod data;
pub mod layout;
pub mod renderer;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use data::InvoiceData;
pub use layout::build_layout;
pub use renderer::{InvoiceRenderer, JsonLayoutRenderer};

use crate::browser::CellFormatter;
use crate::models::{Company, Document};

#[derive(Debug, Error)]
pub enum InvoiceError {
    #[error("{0} is not a sales document")]
    NotASale(String),

    #[error("{0} is cancelled")]
    Cancelled(String),

    #[error("{0} has no partner")]
    MissingPartner(String),

    #[error("{0} has no lines")]
    NoLines(String),

    #[error("failed to encode layout: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// File name for an invoice number, e.g. `FT 2024/7` becomes `FT_2024-7`
pub fn file_stem(number: &str) -> String {
    number
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' => c,
            _ => '_',
        })
        .collect()
}

/// Render a sale document and write it into `dir`, returning the written path
pub fn export_invoice(
    document: &Document,
    company: &Company,
    formatter: &dyn CellFormatter,
    renderer: &dyn InvoiceRenderer,
    dir: &Path,
) -> Result<PathBuf, InvoiceError> {
    let data = InvoiceData::from_document(document, company)?;
    let layout = build_layout(&data, formatter);
    let bytes = renderer.render(&layout)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", file_stem(&data.number), renderer.extension()));
    std::fs::write(&path, bytes)?;

    tracing::info!("Exported invoice {} to {}", data.number, path.display());
    Ok(path)
}
