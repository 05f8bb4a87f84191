//! Google Drive API connector implementation
//!
//! Implements the `StorageProvider` trait for Google Drive API v3.

use async_trait::async_trait;
use bridge_traits::auth::AccessTokenProvider;
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::{FilePage, RemoteItem, StorageProvider, TargetResource};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::GoogleDriveError;
use crate::types::{DriveFile, FilesListResponse};

/// Google Drive API base URL
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Fields requested when listing items to mirror
const LIST_FIELDS: &str = "nextPageToken,files(id,name,createdTime)";

/// Fields requested when looking up the sink by name
const LOOKUP_FIELDS: &str = "nextPageToken,files(id,name)";

/// Page size for name lookups; matches are expected to be few
const LOOKUP_PAGE_SIZE: u32 = 100;

/// Google Drive API connector
///
/// # Example
///
/// ```ignore
/// use provider_google_drive::GoogleDriveConnector;
/// use bridge_traits::storage::StorageProvider;
///
/// let connector = GoogleDriveConnector::new(http_client, token_provider, "Google Drive Assistant");
/// let page = connector.list_files("trashed = false", 10, None).await?;
/// ```
pub struct GoogleDriveConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Bearer token source
    token_provider: Arc<dyn AccessTokenProvider>,

    /// Sent as `User-Agent`
    application_id: String,

    /// API root, overridable for tests
    base_url: String,
}

impl GoogleDriveConnector {
    /// Create a new Google Drive connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `token_provider` - OAuth 2.0 token source with a Drive scope
    /// * `application_id` - Identifier reported to the API as `User-Agent`
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        token_provider: Arc<dyn AccessTokenProvider>,
        application_id: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            token_provider,
            application_id: application_id.into(),
            base_url: DRIVE_API_BASE.to_string(),
        }
    }

    /// Point the connector at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Quote a value for use inside a Drive query string literal
    ///
    /// Backslashes and single quotes are escaped with a backslash.
    pub fn escape_query_literal(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 2);
        escaped.push('\'');
        for ch in value.chars() {
            if ch == '\\' || ch == '\'' {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('\'');
        escaped
    }

    /// Parse RFC 3339 timestamp
    fn parse_timestamp(rfc3339: &str) -> std::result::Result<DateTime<Utc>, GoogleDriveError> {
        DateTime::parse_from_rfc3339(rfc3339)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                GoogleDriveError::ParseError(format!("Invalid createdTime {:?}: {}", rfc3339, e))
            })
    }

    /// Convert a listed DriveFile into a RemoteItem
    fn convert_item(drive_file: DriveFile) -> std::result::Result<RemoteItem, GoogleDriveError> {
        let created_time = drive_file.created_time.as_deref().ok_or_else(|| {
            GoogleDriveError::ParseError(format!("File {:?} has no createdTime", drive_file.name))
        })?;
        let created_at = Self::parse_timestamp(created_time)?;
        Ok(RemoteItem::new(drive_file.name, created_at))
    }

    /// Convert a looked-up DriveFile into a TargetResource
    fn convert_target(file: DriveFile) -> std::result::Result<TargetResource, GoogleDriveError> {
        let id = file.id.ok_or_else(|| {
            GoogleDriveError::ParseError(format!("File {:?} has no id", file.name))
        })?;
        Ok(TargetResource::new(id, file.name))
    }

    /// Execute a GET request once
    ///
    /// Non-success statuses are classified but never retried.
    #[instrument(skip(self, url), fields(url = %url))]
    async fn get(&self, url: String) -> std::result::Result<HttpResponse, GoogleDriveError> {
        let token = self.token_provider.access_token().await?;

        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(token)
            .header("Accept", "application/json")
            .header("User-Agent", self.application_id.clone());

        let response = self.http_client.execute(request).await?;

        if response.is_success() {
            debug!(status = response.status, "API request succeeded");
            Ok(response)
        } else {
            warn!(status = response.status, "API request failed");
            Err(GoogleDriveError::from_status(
                response.status,
                response.text_lossy(),
            ))
        }
    }

    fn files_url(&self, query: &str, page_size: u32, fields: &str, page_token: Option<&str>) -> String {
        let mut url = format!(
            "{}/files?q={}&pageSize={}&fields={}",
            self.base_url,
            urlencoding::encode(query),
            page_size,
            urlencoding::encode(fields)
        );

        if let Some(page_token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(page_token)));
        }

        url
    }

    fn parse_list(response: &HttpResponse) -> std::result::Result<FilesListResponse, GoogleDriveError> {
        serde_json::from_slice(&response.body).map_err(|e| {
            GoogleDriveError::ParseError(format!("Failed to parse files list response: {}", e))
        })
    }
}

#[async_trait]
impl StorageProvider for GoogleDriveConnector {
    #[instrument(skip(self, page_token), fields(has_token = page_token.is_some()))]
    async fn list_files(
        &self,
        query: &str,
        page_size: u32,
        page_token: Option<String>,
    ) -> Result<FilePage> {
        let url = self.files_url(query, page_size, LIST_FIELDS, page_token.as_deref());
        let response = self.get(url).await?;
        let list_response = Self::parse_list(&response)?;

        let items = list_response
            .files
            .into_iter()
            .map(Self::convert_item)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Listed {} files from Google Drive", items.len());

        Ok(FilePage::new(items, list_response.next_page_token))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Vec<TargetResource>> {
        let query = format!(
            "name = {} and trashed = false",
            Self::escape_query_literal(name)
        );

        let mut matches = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = self.files_url(&query, LOOKUP_PAGE_SIZE, LOOKUP_FIELDS, page_token.as_deref());
            let response = self.get(url).await?;
            let list_response = Self::parse_list(&response)?;

            for file in list_response.files {
                matches.push(Self::convert_target(file)?);
            }

            page_token = list_response.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        info!("Found {} file(s) named {:?}", matches.len(), name);
        Ok(matches)
    }

    #[instrument(skip(self))]
    async fn get_file(&self, id: &str) -> Result<TargetResource> {
        let url = format!(
            "{}/files/{}?fields=id,name",
            self.base_url,
            urlencoding::encode(id)
        );

        let response = match self.get(url).await {
            Err(GoogleDriveError::ApiError {
                status_code: 404, ..
            }) => {
                return Err(GoogleDriveError::FileNotFound {
                    file_id: id.to_string(),
                }
                .into())
            }
            other => other?,
        };

        let file: DriveFile = serde_json::from_slice(&response.body).map_err(|e| {
            GoogleDriveError::ParseError(format!("Failed to parse file metadata: {}", e))
        })?;

        Ok(Self::convert_target(file)?)
    }
}
