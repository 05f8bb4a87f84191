//! Google Drive API response types
//!
//! Data structures for deserializing Google Drive API v3 responses. Only the
//! fields requested through `fields=` are modelled.

use serde::{Deserialize, Serialize};

/// Google Drive API file resource
///
/// See: https://developers.google.com/drive/api/v3/reference/files#resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID (requested for sink lookups only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// File name
    pub name: String,

    /// Creation time (RFC 3339, requested for listings only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

/// Google Drive API files.list response
///
/// See: https://developers.google.com/drive/api/v3/reference/files/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesListResponse {
    /// Files on this page; omitted by the API when empty
    #[serde(default)]
    pub files: Vec<DriveFile>,

    /// Token for next page
    #[serde(default)]
    pub next_page_token: Option<String>,
}
