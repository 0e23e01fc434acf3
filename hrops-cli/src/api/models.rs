//! Wire models for the Apps Script endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single spreadsheet cell as it arrives on the wire.
///
/// The endpoint serializes the raw grid, so a cell can be a string, a
/// number, a bool, or null depending on how the sheet was filled in.
pub type Cell = Value;

/// Full 2-D cell grid for one sheet, banner and header rows included.
pub type Grid = Vec<Vec<Cell>>;

/// Response to `?sheet=<name>&action=fetch`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<Grid>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `insert`, `update`, `updateCell`, `deleteFile`, `shareViaEmail`
#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `uploadFile` / `uploadFileWithMetadata`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, rename = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response to `?action=getFiles&folderId=<id>`
#[derive(Debug, Clone, Deserialize)]
pub struct FilesResponse {
    pub success: bool,
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A Drive file as listed by `getFiles`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default, rename = "createdTime")]
    pub created_time: Option<String>,
    #[serde(default, rename = "modifiedTime")]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "webViewLink")]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl DriveFile {
    /// Best-effort view URL, falling back to the canonical Drive link.
    pub fn view_url(&self) -> String {
        self.web_view_link
            .clone()
            .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", self.id))
    }
}

/// Metadata sent with `uploadFileWithMetadata`
#[derive(Debug, Clone, Default)]
pub struct UploadMetadata {
    pub title: String,
    pub category: String,
    pub description: String,
    pub version: String,
    pub effective_date: String,
    pub uploaded_by: String,
}

/// One document reference in a `shareViaEmail` payload
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRef {
    pub name: String,
    #[serde(rename = "serialNo")]
    pub serial_no: String,
    #[serde(rename = "documentType")]
    pub document_type: String,
    pub category: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}
