//! Import command: the per-row variant image pipeline.
//!
//! Rows are processed strictly one after another; each row issues its remote
//! calls in sequence (variant lookup, one upload chain per image URL, one
//! metafield write). Failures are isolated at per-image and per-row
//! granularity so a bad image or row never aborts the batch. There is no
//! retry and no dedup: re-running an import uploads fresh files and
//! overwrites the metafield value.

use std::path::Path;

use varimg_core::{AppConfig, VariantImageRow};
use varimg_shopify::{AdminClient, AdminError};

/// Outcome counters for the end-of-run summary line.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ImportSummary {
    pub rows_total: usize,
    pub variants_updated: usize,
    pub images_attached: usize,
    pub rows_skipped: usize,
    pub rows_failed: usize,
}

/// What happened to a single row.
#[derive(Debug, PartialEq, Eq)]
enum RowOutcome {
    /// Metafield written with this many file references.
    Updated { images: usize },
    /// Dry run: this many uploads would have been attempted.
    Planned { images: usize },
    /// No product/variant matched the row's handle and SKU.
    VariantNotFound,
    /// The row carried no image URLs.
    NoImages,
    /// Every upload failed; the metafield was left untouched.
    AllUploadsFailed,
}

/// Runs the full import: read CSV, process every row, print a summary.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read or the client cannot be
/// constructed. Per-row failures are counted and logged, not propagated.
pub(crate) async fn run_import(
    config: &AppConfig,
    csv_path: &Path,
    namespace: &str,
    key: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let rows = varimg_core::read_rows(csv_path)?;
    if rows.is_empty() {
        println!("no rows found in {}", csv_path.display());
        return Ok(());
    }

    let client = AdminClient::new(
        &config.shop_domain,
        &config.access_token,
        &config.api_version,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let summary = import_rows(&client, &rows, namespace, key, dry_run).await;

    println!(
        "attached {} images across {} variants ({} rows total, {} skipped, {} failed)",
        summary.images_attached,
        summary.variants_updated,
        summary.rows_total,
        summary.rows_skipped,
        summary.rows_failed
    );
    Ok(())
}

/// Processes every row in order, accumulating outcome counters.
pub(crate) async fn import_rows(
    client: &AdminClient,
    rows: &[VariantImageRow],
    namespace: &str,
    key: &str,
    dry_run: bool,
) -> ImportSummary {
    let mut summary = ImportSummary {
        rows_total: rows.len(),
        ..ImportSummary::default()
    };

    for row in rows {
        println!("processing {} / {}", row.handle, row.sku);
        match import_row(client, row, namespace, key, dry_run).await {
            Ok(RowOutcome::Updated { images }) => {
                summary.variants_updated += 1;
                summary.images_attached += images;
                println!("  attached {images} image(s) for {}", row.sku);
            }
            Ok(RowOutcome::Planned { images }) => {
                println!("  dry-run: would upload {images} image(s) for {}", row.sku);
            }
            Ok(RowOutcome::VariantNotFound) => {
                summary.rows_skipped += 1;
                println!(
                    "  variant not found for {} / {}; skipping",
                    row.handle, row.sku
                );
            }
            Ok(RowOutcome::NoImages) => {
                summary.rows_skipped += 1;
                println!("  no image URLs for {}; skipping", row.sku);
            }
            Ok(RowOutcome::AllUploadsFailed) => {
                summary.rows_failed += 1;
                println!(
                    "  all uploads failed for {}; metafield left unchanged",
                    row.sku
                );
            }
            Err(e) => {
                summary.rows_failed += 1;
                tracing::error!(handle = %row.handle, sku = %row.sku, error = %e, "row failed");
                println!("  error processing {}: {e}", row.sku);
            }
        }
    }

    summary
}

/// Processes one row: resolve, upload each image, write the metafield.
///
/// Upload failures are absorbed here (logged, image skipped) so the
/// metafield still receives the successful references in their original
/// column order. Lookup and metafield errors propagate to the caller's
/// per-row handler.
async fn import_row(
    client: &AdminClient,
    row: &VariantImageRow,
    namespace: &str,
    key: &str,
    dry_run: bool,
) -> Result<RowOutcome, AdminError> {
    let Some(variant) = client.find_variant_by_sku(&row.handle, &row.sku).await? else {
        return Ok(RowOutcome::VariantNotFound);
    };

    if row.image_urls.is_empty() {
        return Ok(RowOutcome::NoImages);
    }

    if dry_run {
        return Ok(RowOutcome::Planned {
            images: row.image_urls.len(),
        });
    }

    let mut file_ids = Vec::with_capacity(row.image_urls.len());
    for url in &row.image_urls {
        match client.upload_image(url).await {
            Ok(file_id) => file_ids.push(file_id),
            Err(e) => {
                tracing::warn!(
                    sku = %row.sku,
                    url = %url,
                    error = %e,
                    "image upload failed; continuing with remaining images"
                );
            }
        }
    }

    if file_ids.is_empty() {
        return Ok(RowOutcome::AllUploadsFailed);
    }

    let images = file_ids.len();
    client
        .set_variant_images(&variant.id, namespace, key, &file_ids)
        .await?;
    Ok(RowOutcome::Updated { images })
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
