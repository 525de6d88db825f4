//! Image download, staged upload, and file registration.
//!
//! A staged upload moves bytes to Shopify-managed object storage in three
//! steps: `stagedUploadsCreate` issues a short-lived signed URL, the bytes are
//! sent there directly, and `fileCreate` registers the stored object as a
//! File. The slot is single-use; nothing is cached between calls.

use crate::error::AdminError;
use crate::types::{FileCreateData, StagedTarget, StagedUploadsCreateData};

use super::AdminClient;

const STAGED_UPLOADS_MUTATION: &str = r"
mutation StagedUploadsCreate($input: [StagedUploadInput!]!) {
  stagedUploadsCreate(input: $input) {
    stagedTargets {
      url
      resourceUrl
      parameters {
        name
        value
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

const FILE_CREATE_MUTATION: &str = r"
mutation FileCreate($files: [FileCreateInput!]!) {
  fileCreate(files: $files) {
    files {
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
    /// Downloads the image bytes behind `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::UnexpectedStatus`] for any non-2xx response and
    /// [`AdminError::Http`] on network failure.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, AdminError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Requests a staged upload slot sized for `byte_len` bytes of `mime_type`.
    ///
    /// The slot is issued with `httpMethod: PUT`; send the bytes with
    /// [`AdminClient::upload_to_staged_target`].
    ///
    /// # Errors
    ///
    /// - [`AdminError::UserErrors`] — Shopify rejected the input.
    /// - [`AdminError::EmptyResult`] — no staged target in the response.
    /// - any error from [`AdminClient::execute`].
    pub async fn create_staged_upload(
        &self,
        filename: &str,
        mime_type: &str,
        byte_len: usize,
    ) -> Result<StagedTarget, AdminError> {
        let variables = serde_json::json!({
            "input": [{
                "filename": filename,
                "mimeType": mime_type,
                "resource": "FILE",
                "fileSize": byte_len.to_string(),
                "httpMethod": "PUT",
            }]
        });
        let data: StagedUploadsCreateData = self
            .execute(STAGED_UPLOADS_MUTATION, variables, "stagedUploadsCreate")
            .await?;

        Self::require_no_user_errors("stagedUploadsCreate", data.payload.user_errors)?;
        data.payload
            .staged_targets
            .into_iter()
            .next()
            .ok_or_else(|| AdminError::EmptyResult {
                context: "stagedUploadsCreate".to_owned(),
            })
    }

    /// PUTs the bytes to the staged target's signed URL.
    ///
    /// The target's `parameters` are sent as request headers. A
    /// `Content-Type` header is added from `mime_type` unless the parameters
    /// already carry one.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::UnexpectedStatus`] for any non-2xx response and
    /// [`AdminError::Http`] on network failure.
    pub async fn upload_to_staged_target(
        &self,
        target: &StagedTarget,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AdminError> {
        let mut request = self.client.put(&target.url).body(bytes);
        for parameter in &target.parameters {
            request = request.header(parameter.name.as_str(), parameter.value.as_str());
        }
        let has_content_type = target
            .parameters
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case("content_type") || p.name.eq_ignore_ascii_case("content-type"));
        if !has_content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, mime_type);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::UnexpectedStatus {
                status: status.as_u16(),
                url: target.url.clone(),
            });
        }
        Ok(())
    }

    /// Registers a staged resource as a Shopify File and returns its GID.
    ///
    /// # Errors
    ///
    /// - [`AdminError::UserErrors`] — Shopify rejected the input.
    /// - [`AdminError::EmptyResult`] — the mutation reported no created file.
    /// - any error from [`AdminClient::execute`].
    pub async fn create_file(&self, resource_url: &str) -> Result<String, AdminError> {
        let variables = serde_json::json!({
            "files": [{
                "originalSource": resource_url,
                "contentType": "IMAGE",
            }]
        });
        let data: FileCreateData = self
            .execute(FILE_CREATE_MUTATION, variables, "fileCreate")
            .await?;

        Self::require_no_user_errors("fileCreate", data.payload.user_errors)?;
        data.payload
            .files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| AdminError::EmptyResult {
                context: "fileCreate".to_owned(),
            })
    }

    /// Uploads the image behind `image_url` end to end and returns the file GID.
    ///
    /// Chains download → staged upload slot → signed PUT → `fileCreate`.
    /// Filename and MIME type are inferred from the URL.
    ///
    /// # Errors
    ///
    /// Propagates the first failing step's error; the caller decides whether
    /// to continue with the row's remaining images.
    pub async fn upload_image(&self, image_url: &str) -> Result<String, AdminError> {
        let bytes = self.download_image(image_url).await?;
        let mime_type = varimg_core::mime_type_for_url(image_url);
        let filename = varimg_core::filename_for_url(image_url);

        let target = self
            .create_staged_upload(&filename, mime_type, bytes.len())
            .await?;
        self.upload_to_staged_target(&target, mime_type, bytes)
            .await?;
        self.create_file(&target.resource_url).await
    }
}
