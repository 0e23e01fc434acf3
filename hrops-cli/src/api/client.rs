//! HTTP client for the Apps Script web endpoint
//!
//! Every dashboard workflow talks to one deployed Apps Script URL. Reads are
//! `GET ?sheet=<name>&action=fetch` returning the raw 2-D grid; writes are
//! urlencoded `POST` bodies dispatched by the `action` field. This client is
//! the single place that knows that wire contract.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, warn};

use super::config::RequestConfig;
use super::models::{
    DocumentRef, DriveFile, FetchResponse, FilesResponse, Grid, PostResponse, UploadMetadata,
    UploadResponse,
};

/// Client for one Apps Script deployment
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    config: RequestConfig,
}

impl SheetsClient {
    pub fn new(base_url: impl Into<String>, config: RequestConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full cell grid of a sheet, banner/header rows included.
    pub async fn fetch_sheet(&self, sheet: &str) -> Result<Grid> {
        debug!("Fetching sheet '{}'", sheet);
        let response = self
            .send(|http| {
                http.get(&self.base_url)
                    .query(&[("sheet", sheet), ("action", "fetch")])
            })
            .await
            .with_context(|| format!("Failed to fetch sheet '{}'", sheet))?;

        let body: FetchResponse = response
            .json()
            .await
            .with_context(|| format!("Malformed fetch response for sheet '{}'", sheet))?;

        if !body.success {
            bail!(
                "Server rejected fetch of sheet '{}': {}",
                sheet,
                body.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        // A missing data array is "no data", not a crash.
        Ok(body.data.unwrap_or_default())
    }

    /// Append one row to a sheet.
    pub async fn insert_row(&self, sheet: &str, row: &[String]) -> Result<()> {
        let row_json = serde_json::to_string(row).context("Failed to encode row data")?;
        let params = vec![
            ("action", "insert".to_string()),
            ("sheetName", sheet.to_string()),
            ("rowData", row_json),
        ];
        self.post_expect_success(&params)
            .await
            .with_context(|| format!("Failed to insert row into sheet '{}'", sheet))
    }

    /// Write a single cell. Indices are 1-based, sheet-relative.
    pub async fn update_cell(
        &self,
        sheet: &str,
        row_index: usize,
        column_index: usize,
        value: &str,
    ) -> Result<()> {
        let params = vec![
            ("action", "updateCell".to_string()),
            ("sheetName", sheet.to_string()),
            ("rowIndex", row_index.to_string()),
            ("columnIndex", column_index.to_string()),
            ("value", value.to_string()),
        ];
        self.post_expect_success(&params).await.with_context(|| {
            format!(
                "Failed to update cell ({}, {}) in sheet '{}'",
                row_index, column_index, sheet
            )
        })
    }

    /// Overwrite a whole existing row. `row_index` is 1-based.
    pub async fn update_row(&self, sheet: &str, row_index: usize, row: &[String]) -> Result<()> {
        let row_json = serde_json::to_string(row).context("Failed to encode row data")?;
        let params = vec![
            ("action", "update".to_string()),
            ("sheetName", sheet.to_string()),
            ("rowIndex", row_index.to_string()),
            ("rowData", row_json),
        ];
        self.post_expect_success(&params)
            .await
            .with_context(|| format!("Failed to update row {} in sheet '{}'", row_index, sheet))
    }

    /// Upload a file to a Drive folder, returning the file URL.
    pub async fn upload_file(
        &self,
        file_name: &str,
        mime_type: &str,
        folder_id: &str,
        bytes: &[u8],
    ) -> Result<String> {
        let params = vec![
            ("action", "uploadFile".to_string()),
            ("base64Data", data_url(mime_type, bytes)),
            ("fileName", file_name.to_string()),
            ("mimeType", mime_type.to_string()),
            ("folderId", folder_id.to_string()),
        ];
        self.post_upload(&params)
            .await
            .with_context(|| format!("Failed to upload file '{}'", file_name))
    }

    /// Upload a file plus its document metadata (HR policy uploads).
    pub async fn upload_file_with_metadata(
        &self,
        file_name: &str,
        mime_type: &str,
        folder_id: &str,
        bytes: &[u8],
        meta: &UploadMetadata,
    ) -> Result<String> {
        let params = vec![
            ("action", "uploadFileWithMetadata".to_string()),
            ("base64Data", data_url(mime_type, bytes)),
            ("fileName", file_name.to_string()),
            ("mimeType", mime_type.to_string()),
            ("folderId", folder_id.to_string()),
            ("title", meta.title.clone()),
            ("category", meta.category.clone()),
            ("description", meta.description.clone()),
            ("version", meta.version.clone()),
            ("effectiveDate", meta.effective_date.clone()),
            ("uploadedBy", meta.uploaded_by.clone()),
        ];
        self.post_upload(&params)
            .await
            .with_context(|| format!("Failed to upload file '{}'", file_name))
    }

    /// Delete a Drive file by id.
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let params = vec![
            ("action", "deleteFile".to_string()),
            ("fileId", file_id.to_string()),
        ];
        self.post_expect_success(&params)
            .await
            .with_context(|| format!("Failed to delete file '{}'", file_id))
    }

    /// List files in a Drive folder.
    pub async fn get_files(&self, folder_id: &str) -> Result<Vec<DriveFile>> {
        let response = self
            .send(|http| {
                http.get(&self.base_url)
                    .query(&[("action", "getFiles"), ("folderId", folder_id)])
            })
            .await
            .with_context(|| format!("Failed to list files in folder '{}'", folder_id))?;

        let body: FilesResponse = response
            .json()
            .await
            .context("Malformed getFiles response")?;

        if !body.success {
            bail!(
                "Server rejected file listing: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        Ok(body.files)
    }

    /// Send candidate or policy documents to a recipient by email.
    pub async fn share_via_email(
        &self,
        recipient_email: &str,
        subject: &str,
        message: &str,
        documents: &[DocumentRef],
    ) -> Result<()> {
        let docs_json =
            serde_json::to_string(documents).context("Failed to encode document list")?;
        let params = vec![
            ("action", "shareViaEmail".to_string()),
            ("recipientEmail", recipient_email.to_string()),
            ("subject", subject.to_string()),
            ("message", message.to_string()),
            ("documents", docs_json),
        ];
        self.post_expect_success(&params)
            .await
            .with_context(|| format!("Failed to share documents with {}", recipient_email))
    }

    async fn post_expect_success(&self, params: &[(&str, String)]) -> Result<()> {
        let response = self
            .send(|http| http.post(&self.base_url).form(params))
            .await?;
        let body: PostResponse = response.json().await.context("Malformed server response")?;
        if !body.success {
            bail!(
                "Server returned unsuccessful response: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        Ok(())
    }

    async fn post_upload(&self, params: &[(&str, String)]) -> Result<String> {
        let response = self
            .send(|http| http.post(&self.base_url).form(params))
            .await?;
        let body: UploadResponse = response.json().await.context("Malformed upload response")?;
        if !body.success {
            bail!(
                "File upload failed: {}",
                body.error.unwrap_or_else(|| "unknown error".to_string())
            );
        }
        body.file_url
            .context("Upload succeeded but no file URL was returned")
    }

    /// Issue a request with the uniform timeout, retrying transient failures.
    async fn send<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let mut last_error = None;
        for attempt in 1..=self.config.max_attempts {
            let result = build(&self.http)
                .timeout(self.config.timeout)
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    last_error = Some(anyhow::anyhow!("HTTP error! status: {}", status));
                    // Client errors will not resolve themselves; do not retry.
                    if status.is_client_error() {
                        break;
                    }
                }
                Err(e) => last_error = Some(e.into()),
            }
            if attempt < self.config.max_attempts {
                warn!(
                    "Request attempt {}/{} failed, retrying",
                    attempt, self.config.max_attempts
                );
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Request failed")))
    }
}

/// Browser uploads arrive as `FileReader.readAsDataURL` output; the server
/// strips the prefix itself, so the data URL shape must be preserved.
fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_shape() {
        let url = data_url("text/plain", b"hi");
        assert_eq!(url, "data:text/plain;base64,aGk=");
    }

    #[test]
    fn test_document_ref_wire_names() {
        let doc = DocumentRef {
            name: "A. Candidate".into(),
            serial_no: "ENQ-1".into(),
            document_type: "Operator".into(),
            category: "Production".into(),
            image_url: String::new(),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("serialNo").is_some());
        assert!(json.get("documentType").is_some());
        assert!(json.get("imageUrl").is_some());
    }
}
