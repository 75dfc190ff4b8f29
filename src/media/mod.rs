//! Media Upload
//!
//! Uploads item images to the blob host and returns the hosted URL for
//! the item's image field. One call per file, no retry; a failed upload
//! leaves the image field unchanged on the caller's side.

use std::path::Path;

use reqwest::StatusCode;

use crate::domain::{CatalogError, DomainResult};

/// Default image size cap (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Blob host client
pub struct MediaUploader {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
    max_bytes: u64,
}

impl MediaUploader {
    pub fn new(
        upload_url: impl Into<String>,
        upload_preset: impl Into<String>,
        max_bytes: u64,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: upload_url.into(),
            upload_preset: upload_preset.into(),
            max_bytes,
        }
    }

    /// Read a file and upload it, guessing the content type from the path
    pub async fn upload_file(&self, path: &Path) -> DomainResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CatalogError::Upload(format!("cannot read {}: {}", path.display(), e)))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        self.upload_bytes(filename, content_type.as_ref(), bytes).await
    }

    /// Upload raw bytes as a multipart form with the configured preset
    pub async fn upload_bytes(
        &self,
        filename: String,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> DomainResult<String> {
        if bytes.len() as u64 > self.max_bytes {
            return Err(CatalogError::Upload(format!(
                "image exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(content_type)
            .map_err(|e| CatalogError::Upload(format!("bad content type: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CatalogError::Upload(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Upload(format!("host returned no JSON: {}", e)))?;
        parse_upload_response(status, &body)
    }
}

/// Pull the hosted URL out of the host's response, surfacing the host's
/// own error message when it rejected the upload
fn parse_upload_response(status: StatusCode, body: &serde_json::Value) -> DomainResult<String> {
    if !status.is_success() {
        let message = body
            .pointer("/error/message")
            .and_then(|message| message.as_str())
            .unwrap_or("upload rejected");
        return Err(CatalogError::Upload(format!("{} ({})", message, status)));
    }
    match body.get("secure_url").and_then(|url| url.as_str()) {
        Some(url) => Ok(url.to_string()),
        None => Err(CatalogError::Upload("host returned no secure_url".into())),
    }
}
