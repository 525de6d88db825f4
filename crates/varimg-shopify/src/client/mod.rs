//! HTTP client for the Shopify Admin GraphQL API.

mod metafields;
mod uploads;
mod variants;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::AdminError;
use crate::types::{GraphQlEnvelope, UserError};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the Shopify Admin GraphQL API.
///
/// Holds the HTTP client, the versioned `graphql.json` endpoint, and the
/// access token. Use [`AdminClient::new`] against a real shop or
/// [`AdminClient::with_base_url`] to point at a mock server in tests.
///
/// The import pipeline issues calls strictly one after another, and the
/// client performs no retries: a transient failure surfaces as an error for
/// the caller to log and skip.
pub struct AdminClient {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl AdminClient {
    /// Creates a client for the given shop domain (e.g. `my-store.myshopify.com`).
    ///
    /// A `https://` prefix on the domain is accepted and normalised away.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidShopDomain`] if the domain does not form a
    /// valid URL, or [`AdminError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        shop_domain: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AdminError> {
        let origin = if shop_domain.starts_with("http://") || shop_domain.starts_with("https://") {
            shop_domain.to_owned()
        } else {
            format!("https://{shop_domain}")
        };
        Self::with_base_url(&origin, access_token, api_version, timeout_secs, user_agent)
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidShopDomain`] if `base_url` is not a valid
    /// URL, or [`AdminError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        access_token: &str,
        api_version: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AdminError> {
        let endpoint = Self::admin_endpoint(base_url, api_version)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
        })
    }

    /// Builds the versioned `graphql.json` endpoint for a shop origin.
    fn admin_endpoint(base_url: &str, api_version: &str) -> Result<Url, AdminError> {
        let origin = base_url.trim_end_matches('/');
        let raw = format!("{origin}/admin/api/{api_version}/graphql.json");
        Url::parse(&raw).map_err(|e| AdminError::InvalidShopDomain {
            shop: base_url.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Posts a GraphQL document and deserializes `data` into `T`.
    ///
    /// `context` labels the operation in errors and logs.
    ///
    /// # Errors
    ///
    /// - [`AdminError::UnexpectedStatus`] — non-2xx HTTP status.
    /// - [`AdminError::GraphQl`] — the response carries a non-empty `errors` array.
    /// - [`AdminError::Deserialize`] — the body is not valid JSON of the expected shape.
    /// - [`AdminError::EmptyResult`] — `data` is null with no reported errors.
    /// - [`AdminError::Http`] — network or TLS failure.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        context: &str,
    ) -> Result<T, AdminError> {
        tracing::debug!(context, "sending Admin API request");

        let body = serde_json::json!({ "query": query, "variables": variables });
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        let envelope: GraphQlEnvelope<T> =
            serde_json::from_str(&text).map_err(|source| AdminError::Deserialize {
                context: context.to_owned(),
                source,
            })?;

        if !envelope.errors.is_empty() {
            return Err(AdminError::GraphQl {
                context: context.to_owned(),
                messages: envelope.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        envelope.data.ok_or_else(|| AdminError::EmptyResult {
            context: context.to_owned(),
        })
    }

    /// Converts a non-empty `userErrors` array into [`AdminError::UserErrors`].
    ///
    /// Mutations report validation failures through `userErrors` rather than
    /// the top-level `errors` array; both are surfaced as errors uniformly.
    pub(crate) fn require_no_user_errors(
        context: &str,
        user_errors: Vec<UserError>,
    ) -> Result<(), AdminError> {
        if user_errors.is_empty() {
            return Ok(());
        }
        Err(AdminError::UserErrors {
            context: context.to_owned(),
            messages: user_errors.into_iter().map(|e| e.message).collect(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
