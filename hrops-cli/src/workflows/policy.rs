//! HR policy documents
//!
//! Policy files live in one Drive folder; the endpoint lists, uploads and
//! deletes them on our behalf, with document metadata carried alongside the
//! upload.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::api::{DriveFile, SheetsClient, UploadMetadata};
use crate::validate;

/// All policy documents in the configured folder.
pub async fn list(client: &SheetsClient, folder_id: &str) -> Result<Vec<DriveFile>> {
    client.get_files(folder_id).await
}

/// Uploads a local file as a policy document and returns its URL.
pub async fn upload(
    client: &SheetsClient,
    folder_id: &str,
    path: &Path,
    meta: &UploadMetadata,
) -> Result<String> {
    validate::require_fields(&[("Title", &meta.title), ("Category", &meta.category)])?;

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file {:?}", path))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid file name {:?}", path))?;
    let mime_type = mime_for(file_name);

    let url = client
        .upload_file_with_metadata(file_name, mime_type, folder_id, &bytes, meta)
        .await?;
    info!("Uploaded policy document '{}' ({})", meta.title, file_name);
    Ok(url)
}

/// Deletes a policy document from Drive.
pub async fn delete(client: &SheetsClient, file_id: &str) -> Result<()> {
    client.delete_file(file_id).await?;
    info!("Deleted policy document {}", file_id);
    Ok(())
}

/// MIME type from the file extension; the endpoint needs it for the data URL.
fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_for("Leave_Policy_v2.pdf"), "application/pdf");
        assert_eq!(mime_for("photo.JPG"), "image/jpeg");
        assert_eq!(mime_for("handbook.docx"), mime_for("a.docx"));
        assert_eq!(mime_for("no-extension"), "application/octet-stream");
    }
}
