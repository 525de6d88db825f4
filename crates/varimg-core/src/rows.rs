//! CSV row model and reader for variant image imports.
//!
//! ## Accepted schemas
//!
//! Two header layouts occur in the wild and both are accepted:
//!
//! - `handle, sku, image_url` — a single image column.
//! - `handle, sku, variant_image_2, ..., variant_image_6` — one column per
//!   gallery slot.
//!
//! Every column named `image_url` or starting with `variant_image`
//! contributes, in header order. Empty cells are skipped, so a row may carry
//! fewer URLs than the header has image columns. No further schema validation
//! is performed: duplicate or malformed rows are passed through and surface
//! later as remote lookup or download failures.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column \"{0}\" in CSV header")]
    MissingColumn(&'static str),
}

/// One CSV row: a variant key plus its image URLs in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantImageRow {
    pub handle: String,
    pub sku: String,
    pub image_urls: Vec<String>,
}

/// Reads all rows from a CSV file on disk.
///
/// # Errors
///
/// Returns [`RowError::Io`] if the file cannot be opened, and propagates any
/// error from [`read_rows_from_reader`].
pub fn read_rows(path: &Path) -> Result<Vec<VariantImageRow>, RowError> {
    let file = std::fs::File::open(path).map_err(|source| RowError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_rows_from_reader(file)
}

/// Reads all rows from any CSV source.
///
/// # Errors
///
/// Returns [`RowError::MissingColumn`] when the header lacks `handle` or
/// `sku`, or [`RowError::Csv`] on malformed CSV input.
pub fn read_rows_from_reader<R: Read>(reader: R) -> Result<Vec<VariantImageRow>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let handle_idx = column_index(&headers, "handle")?;
    let sku_idx = column_index(&headers, "sku")?;
    let image_indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| is_image_column(name))
        .map(|(idx, _)| idx)
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let image_urls = image_indices
            .iter()
            .filter_map(|&idx| {
                let value = record.get(idx).unwrap_or("");
                (!value.is_empty()).then(|| value.to_owned())
            })
            .collect();
        rows.push(VariantImageRow {
            handle: record.get(handle_idx).unwrap_or("").to_owned(),
            sku: record.get(sku_idx).unwrap_or("").to_owned(),
            image_urls,
        });
    }
    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, RowError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(RowError::MissingColumn(name))
}

fn is_image_column(name: &str) -> bool {
    name == "image_url" || name.starts_with("variant_image")
}

#[cfg(test)]
#[path = "rows_test.rs"]
mod tests;
