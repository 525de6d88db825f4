//! Variant resolution by product handle and SKU.

use crate::error::AdminError;
use crate::types::{ProductByHandleData, VariantRef};

use super::AdminClient;

/// 250 is Shopify's per-product variant ceiling, so a single page always
/// covers the whole variant list.
const PRODUCT_VARIANTS_QUERY: &str = r"
query ProductVariantsByHandle($handle: String!) {
  productByHandle(handle: $handle) {
    id
    variants(first: 250) {
      nodes {
        id
        sku
      }
    }
  }
}
";

impl AdminClient {
    /// Resolves a variant by `(handle, sku)`.
    ///
    /// Queries the product by handle and scans its variants for the first one
    /// whose SKU equals `sku` (exact, case-sensitive). Returns `Ok(None)` when
    /// the product does not exist or none of its variants carries the SKU;
    /// callers log and skip the row rather than treating this as a failure.
    ///
    /// # Errors
    ///
    /// Propagates any error from the underlying GraphQL request; see
    /// [`AdminClient::execute`].
    pub async fn find_variant_by_sku(
        &self,
        handle: &str,
        sku: &str,
    ) -> Result<Option<VariantRef>, AdminError> {
        let context = format!("productByHandle({handle})");
        let variables = serde_json::json!({ "handle": handle });
        let data: ProductByHandleData = self
            .execute(PRODUCT_VARIANTS_QUERY, variables, &context)
            .await?;

        let Some(product) = data.product else {
            tracing::debug!(handle, "product not found");
            return Ok(None);
        };

        let variant = product
            .variants
            .nodes
            .into_iter()
            .find(|v| v.sku.as_deref() == Some(sku));

        if variant.is_none() {
            tracing::debug!(handle, sku, "no variant with matching SKU");
        }

        Ok(variant.map(|v| VariantRef { id: v.id }))
    }
}
