//! Metafield assignment for resolved variants.

use crate::error::AdminError;
use crate::types::MetafieldsSetData;

use super::AdminClient;

const METAFIELDS_SET_MUTATION: &str = r"
mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) {
  metafieldsSet(metafields: $metafields) {
    metafields {
      id
    }
    userErrors {
      field
      message
    }
  }
}
";

impl AdminClient {
    /// Writes `file_ids` to the variant's `list.file_reference` metafield.
    ///
    /// The metafield value is the JSON array of file GIDs in the given order.
    /// An existing value is overwritten: re-running an import replaces the
    /// list rather than appending to it.
    ///
    /// # Errors
    ///
    /// - [`AdminError::UserErrors`] — Shopify rejected the metafield input.
    /// - [`AdminError::EmptyResult`] — the mutation reported no metafield.
    /// - any error from [`AdminClient::execute`].
    pub async fn set_variant_images(
        &self,
        variant_id: &str,
        namespace: &str,
        key: &str,
        file_ids: &[String],
    ) -> Result<(), AdminError> {
        let value = serde_json::json!(file_ids).to_string();
        let variables = serde_json::json!({
            "metafields": [{
                "ownerId": variant_id,
                "namespace": namespace,
                "key": key,
                "type": "list.file_reference",
                "value": value,
            }]
        });
        let data: MetafieldsSetData = self
            .execute(METAFIELDS_SET_MUTATION, variables, "metafieldsSet")
            .await?;

        Self::require_no_user_errors("metafieldsSet", data.payload.user_errors)?;
        let Some(written) = data.payload.metafields.first() else {
            return Err(AdminError::EmptyResult {
                context: "metafieldsSet".to_owned(),
            });
        };
        tracing::debug!(metafield_id = %written.id, "variant metafield written");
        Ok(())
    }
}
