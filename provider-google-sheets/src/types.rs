//! Google Sheets API request and response types
//!
//! Only the members this crate sends or reads are modelled.

use bridge_traits::sheets::Row;
use serde::{Deserialize, Serialize};

/// `spreadsheets.create` request body
#[derive(Debug, Serialize)]
pub struct CreateSpreadsheetRequest<'a> {
    pub properties: SpreadsheetProperties<'a>,
}

/// Properties set at creation
#[derive(Debug, Serialize)]
pub struct SpreadsheetProperties<'a> {
    pub title: &'a str,
}

/// `spreadsheets.create` response; the full resource, trimmed
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: Option<String>,
}

/// `spreadsheets.values.update` request body
///
/// See: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange<'a> {
    pub range: String,
    pub major_dimension: &'static str,
    pub values: &'a [Row],
}

/// `spreadsheets.values.update` response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    /// Absent when nothing changed
    #[serde(default)]
    pub updated_cells: Option<u64>,
}

/// `spreadsheets.batchUpdate` request body
#[derive(Debug, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<SheetRequest>,
}

/// One entry of a batch update; serialized as a single-key object
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetRequest {
    AutoResizeDimensions(AutoResizeDimensions),
}

#[derive(Debug, Serialize)]
pub struct AutoResizeDimensions {
    pub dimensions: DimensionRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: u32,
    pub dimension: &'static str,
    pub start_index: u32,
    pub end_index: u32,
}
