//! Google Sheets API connector implementation
//!
//! Implements the `SpreadsheetService` trait for Google Sheets API v4.

use async_trait::async_trait;
use bridge_traits::auth::AccessTokenProvider;
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::sheets::{CellAnchor, Row, SpreadsheetService, ValueInputMode};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::GoogleSheetsError;
use crate::types::{
    AutoResizeDimensions, BatchUpdateRequest, CreateSpreadsheetRequest, DimensionRange,
    SheetRequest, Spreadsheet, SpreadsheetProperties, UpdateValuesResponse, ValueRange,
};

/// Google Sheets API base URL
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Google Sheets API connector
///
/// # Example
///
/// ```ignore
/// use provider_google_sheets::GoogleSheetsConnector;
/// use bridge_traits::sheets::SpreadsheetService;
///
/// let connector = GoogleSheetsConnector::new(http_client, token_provider, "Google Drive Assistant");
/// let id = connector.create_spreadsheet("AllFilesSpreadsheet").await?;
/// ```
pub struct GoogleSheetsConnector {
    http_client: Arc<dyn HttpClient>,
    token_provider: Arc<dyn AccessTokenProvider>,
    application_id: String,
    base_url: String,
}

impl GoogleSheetsConnector {
    /// Create a new Google Sheets connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `token_provider` - OAuth 2.0 token source with a Sheets scope
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
            base_url: SHEETS_API_BASE.to_string(),
        }
    }

    /// Point the connector at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Authorize and send a request once
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    async fn send(
        &self,
        spreadsheet_id: Option<&str>,
        request: HttpRequest,
    ) -> std::result::Result<HttpResponse, GoogleSheetsError> {
        let token = self.token_provider.access_token().await?;

        let request = request
            .bearer_token(token)
            .header("Accept", "application/json")
            .header("User-Agent", self.application_id.clone());

        let response = self.http_client.execute(request).await?;

        if response.is_success() {
            debug!(status = response.status, "API request succeeded");
            return Ok(response);
        }

        warn!(status = response.status, "API request failed");
        match (response.status, spreadsheet_id) {
            (404, Some(id)) => Err(GoogleSheetsError::SpreadsheetNotFound {
                spreadsheet_id: id.to_string(),
            }),
            (status, _) => Err(GoogleSheetsError::from_status(
                status,
                response.text_lossy(),
            )),
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(
        response: &HttpResponse,
        what: &str,
    ) -> std::result::Result<T, GoogleSheetsError> {
        serde_json::from_slice(&response.body)
            .map_err(|e| GoogleSheetsError::ParseError(format!("Failed to parse {}: {}", what, e)))
    }
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsConnector {
    #[instrument(skip(self))]
    async fn create_spreadsheet(&self, title: &str) -> Result<String> {
        let body = CreateSpreadsheetRequest {
            properties: SpreadsheetProperties { title },
        };
        let request =
            HttpRequest::new(HttpMethod::Post, format!("{}/spreadsheets", self.base_url))
                .json(&body)?;

        let response = self.send(None, request).await?;
        let spreadsheet: Spreadsheet = Self::parse(&response, "spreadsheet resource")?;

        let id = spreadsheet.spreadsheet_id.ok_or_else(|| {
            GoogleSheetsError::ParseError("Created spreadsheet has no spreadsheetId".to_string())
        })?;

        info!(spreadsheet_id = %id, "Created spreadsheet");
        Ok(id)
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    async fn write_range(
        &self,
        spreadsheet_id: &str,
        anchor: CellAnchor,
        rows: &[Row],
        mode: ValueInputMode,
    ) -> Result<u64> {
        let range = anchor.to_a1();
        let url = format!(
            "{}/spreadsheets/{}/values/{}?valueInputOption={}",
            self.base_url,
            urlencoding::encode(spreadsheet_id),
            urlencoding::encode(&range),
            mode.as_str()
        );
        let body = ValueRange {
            range,
            major_dimension: "ROWS",
            values: rows,
        };
        let request = HttpRequest::new(HttpMethod::Put, url).json(&body)?;

        let response = self.send(Some(spreadsheet_id), request).await?;
        let update: UpdateValuesResponse = if response.body.is_empty() {
            UpdateValuesResponse::default()
        } else {
            Self::parse(&response, "values update response")?
        };

        let updated_cells = update.updated_cells.unwrap_or(0);
        debug!(updated_cells, "Wrote values");
        Ok(updated_cells)
    }

    #[instrument(skip(self))]
    async fn auto_resize_columns(
        &self,
        spreadsheet_id: &str,
        sheet_id: u32,
        start_index: u32,
        end_index: u32,
    ) -> Result<()> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.base_url,
            urlencoding::encode(spreadsheet_id)
        );
        let body = BatchUpdateRequest {
            requests: vec![SheetRequest::AutoResizeDimensions(AutoResizeDimensions {
                dimensions: DimensionRange {
                    sheet_id,
                    dimension: "COLUMNS",
                    start_index,
                    end_index,
                },
            })],
        };
        let request = HttpRequest::new(HttpMethod::Post, url).json(&body)?;

        self.send(Some(spreadsheet_id), request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::auth::StaticTokenProvider;
    use bridge_traits::error::BridgeError;
    use bytes::Bytes;
    use mockall::mock;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    fn response(status: u16, body: &'static str) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        })
    }

    fn body_json(request: &HttpRequest) -> Value {
        serde_json::from_slice(request.body.as_ref().unwrap()).unwrap()
    }

    fn connector(http: MockHttpClient) -> GoogleSheetsConnector {
        GoogleSheetsConnector::new(
            Arc::new(http),
            Arc::new(StaticTokenProvider::new("test_token")),
            "Google Drive Assistant",
        )
        .with_base_url("https://sheets.test/v4")
    }

    #[tokio::test]
    async fn test_create_spreadsheet() {
        let mut http = MockHttpClient::new();
        http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.url, "https://sheets.test/v4/spreadsheets");
            assert_eq!(
                req.headers.get("User-Agent"),
                Some(&"Google Drive Assistant".to_string())
            );
            assert_eq!(
                body_json(&req),
                json!({ "properties": { "title": "AllFilesSpreadsheet" } })
            );
            response(
                200,
                r#"{ "spreadsheetId": "new-sheet", "properties": { "title": "AllFilesSpreadsheet" } }"#,
            )
        });

        let id = connector(http)
            .create_spreadsheet("AllFilesSpreadsheet")
            .await
            .unwrap();
        assert_eq!(id, "new-sheet");
    }

    #[tokio::test]
    async fn test_create_spreadsheet_without_id() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| response(200, r#"{ "properties": {} }"#));

        let result = connector(http).create_spreadsheet("x").await;
        assert!(matches!(result, Err(BridgeError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_write_range_raw_at_origin() {
        let mut http = MockHttpClient::new();
        http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Put);
            assert_eq!(
                req.url,
                "https://sheets.test/v4/spreadsheets/sheet-1/values/A1?valueInputOption=RAW"
            );
            assert_eq!(
                body_json(&req),
                json!({
                    "range": "A1",
                    "majorDimension": "ROWS",
                    "values": [["=SUM(A1)", "2023-01-02"], ["a.txt", "2023-01-01"]]
                })
            );
            response(200, r#"{ "spreadsheetId": "sheet-1", "updatedCells": 4 }"#)
        });

        let rows: Vec<Row> = vec![
            ["=SUM(A1)".to_string(), "2023-01-02".to_string()],
            ["a.txt".to_string(), "2023-01-01".to_string()],
        ];
        let updated = connector(http)
            .write_range("sheet-1", CellAnchor::ORIGIN, &rows, ValueInputMode::Raw)
            .await
            .unwrap();
        assert_eq!(updated, 4);
    }

    #[tokio::test]
    async fn test_write_range_missing_count_is_zero() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| response(200, r#"{ "spreadsheetId": "sheet-1" }"#));

        let updated = connector(http)
            .write_range("sheet-1", CellAnchor::ORIGIN, &[], ValueInputMode::Raw)
            .await
            .unwrap();
        assert_eq!(updated, 0);
    }

    #[tokio::test]
    async fn test_write_range_missing_spreadsheet() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| response(404, "Requested entity was not found."));

        let result = connector(http)
            .write_range("gone", CellAnchor::ORIGIN, &[], ValueInputMode::Raw)
            .await;
        assert!(matches!(result, Err(BridgeError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_auto_resize_first_column() {
        let mut http = MockHttpClient::new();
        http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.url, "https://sheets.test/v4/spreadsheets/sheet-1:batchUpdate");
            assert_eq!(
                body_json(&req),
                json!({
                    "requests": [{
                        "autoResizeDimensions": {
                            "dimensions": {
                                "sheetId": 0,
                                "dimension": "COLUMNS",
                                "startIndex": 0,
                                "endIndex": 1
                            }
                        }
                    }]
                })
            );
            response(200, r#"{ "spreadsheetId": "sheet-1", "replies": [{}] }"#)
        });

        connector(http)
            .auto_resize_columns("sheet-1", 0, 0, 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_forbidden_is_unauthorized() {
        let mut http = MockHttpClient::new();
        http.expect_execute()
            .times(1)
            .returning(|_| response(403, "The caller does not have permission"));

        let result = connector(http).auto_resize_columns("sheet-1", 0, 0, 1).await;
        assert!(matches!(result, Err(BridgeError::Unauthorized(_))));
    }
}
