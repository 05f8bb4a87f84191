//! Tabular Sink Abstraction
//!
//! Contract for the spreadsheet service receiving the synchronized rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// One written row: `(name, formatted date)`
pub type Row = [String; 2];

/// 1-based cell position rendered in A1 notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAnchor {
    pub row: u32,
    pub column: u32,
}

impl CellAnchor {
    /// Top-left cell of the first sheet
    pub const ORIGIN: CellAnchor = CellAnchor { row: 1, column: 1 };

    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Render as A1 notation, e.g. `(1, 28)` → `AB1`
    pub fn to_a1(&self) -> String {
        let mut letters = Vec::new();
        let mut column = self.column.max(1);
        while column > 0 {
            let rem = (column - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            column = (column - 1) / 26;
        }
        let column: String = letters.into_iter().rev().collect();
        format!("{}{}", column, self.row.max(1))
    }
}

impl fmt::Display for CellAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// How the sink interprets written values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueInputMode {
    /// Stored exactly as sent: no formula evaluation, no locale parsing
    Raw,
    /// Parsed as if typed into the UI
    UserEntered,
}

impl ValueInputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputMode::Raw => "RAW",
            ValueInputMode::UserEntered => "USER_ENTERED",
        }
    }
}

/// Spreadsheet service trait
///
/// Abstracts the sink provider:
/// - Google Sheets: `spreadsheets.create`, `values.update`, `batchUpdate`
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Create a spreadsheet titled `title`, returning its id
    async fn create_spreadsheet(&self, title: &str) -> Result<String>;

    /// Overwrite cells starting at `anchor`
    ///
    /// Returns the number of cells the service reports as updated.
    async fn write_range(
        &self,
        spreadsheet_id: &str,
        anchor: CellAnchor,
        rows: &[Row],
        mode: ValueInputMode,
    ) -> Result<u64>;

    /// Auto-fit the width of columns `[start_index, end_index)` on sheet `sheet_id`
    async fn auto_resize_columns(
        &self,
        spreadsheet_id: &str,
        sheet_id: u32,
        start_index: u32,
        end_index: u32,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_a1() {
        assert_eq!(CellAnchor::ORIGIN.to_a1(), "A1");
    }

    #[test]
    fn test_a1_column_letters() {
        assert_eq!(CellAnchor::new(3, 2).to_a1(), "B3");
        assert_eq!(CellAnchor::new(1, 26).to_a1(), "Z1");
        assert_eq!(CellAnchor::new(1, 27).to_a1(), "AA1");
        assert_eq!(CellAnchor::new(10, 28).to_string(), "AB10");
        assert_eq!(CellAnchor::new(1, 702).to_a1(), "ZZ1");
        assert_eq!(CellAnchor::new(1, 703).to_a1(), "AAA1");
    }

    #[test]
    fn test_value_input_mode_wire_names() {
        assert_eq!(ValueInputMode::Raw.as_str(), "RAW");
        assert_eq!(ValueInputMode::UserEntered.as_str(), "USER_ENTERED");
    }
}
