//! Admin GraphQL API request/response types.
//!
//! ## Observed response shapes
//!
//! ### Top-level envelope
//! Every Admin GraphQL response is `{"data": ..., "errors": [...]}`. The
//! `errors` array is absent on success (not `[]`), so it is modeled with
//! `#[serde(default)]`. `data` can be present alongside `errors` for partial
//! failures; any non-empty `errors` array is treated as a failure here.
//!
//! ### `productByHandle`
//! `null` (inside `data`) when no product matches the handle, not a GraphQL
//! error. Variant `sku` may be `null` or an empty string on storefronts that
//! do not assign SKUs; both compare unequal to any real SKU.
//!
//! ### Mutation payloads
//! Every mutation carries a `userErrors` array that is `[]` on success.
//! `stagedUploadsCreate` returns one staged target per input; `parameters`
//! must be echoed back on the upload request (as headers for `PUT` targets).

use serde::Deserialize;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorEntry {
    pub message: String,
}

/// A mutation-level user error (validation failure reported by Shopify).
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// An opaque reference to a resolved product variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRef {
    /// Variant GID, e.g. `gid://shopify/ProductVariant/123`.
    pub id: String,
}

// ---------------------------------------------------------------------------
// productByHandle
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ProductByHandleData {
    #[serde(rename = "productByHandle")]
    pub product: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductNode {
    pub variants: VariantConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantConnection {
    pub nodes: Vec<VariantNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantNode {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
}

// ---------------------------------------------------------------------------
// stagedUploadsCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct StagedUploadsCreateData {
    #[serde(rename = "stagedUploadsCreate")]
    pub payload: StagedUploadsCreatePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StagedUploadsCreatePayload {
    #[serde(rename = "stagedTargets", default)]
    pub staged_targets: Vec<StagedTarget>,
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}

/// A short-lived signed upload slot issued by `stagedUploadsCreate`.
#[derive(Debug, Clone, Deserialize)]
pub struct StagedTarget {
    /// Signed object-storage URL the bytes are sent to.
    pub url: String,
    /// Stable URL used as `originalSource` when registering the file.
    #[serde(rename = "resourceUrl")]
    pub resource_url: String,
    /// Upload parameters; sent as request headers for `PUT` targets.
    #[serde(default)]
    pub parameters: Vec<StagedParameter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StagedParameter {
    pub name: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// fileCreate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct FileCreateData {
    #[serde(rename = "fileCreate")]
    pub payload: FileCreatePayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileCreatePayload {
    #[serde(default)]
    pub files: Vec<CreatedFile>,
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedFile {
    /// File GID, e.g. `gid://shopify/MediaImage/456`.
    pub id: String,
}

// ---------------------------------------------------------------------------
// metafieldsSet
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct MetafieldsSetData {
    #[serde(rename = "metafieldsSet")]
    pub payload: MetafieldsSetPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetafieldsSetPayload {
    #[serde(default)]
    pub metafields: Vec<SetMetafield>,
    #[serde(rename = "userErrors", default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetMetafield {
    pub id: String,
}
