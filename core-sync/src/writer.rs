//! Row projection and spreadsheet overwrite

use bridge_traits::sheets::{CellAnchor, Row, SpreadsheetService, ValueInputMode};
use bridge_traits::storage::{RemoteItem, TargetResource};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::Result;

/// Date format of the second column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sheet receiving the rows (the first tab of a new spreadsheet)
const SHEET_ID: u32 = 0;

/// Project an item to `[name, creation date]`
pub fn to_row(item: &RemoteItem) -> Row {
    [
        item.name.clone(),
        item.created_at.format(DATE_FORMAT).to_string(),
    ]
}

/// Writes listed items into the sink
pub struct SinkWriter {
    sheets: Arc<dyn SpreadsheetService>,
}

impl SinkWriter {
    pub fn new(sheets: Arc<dyn SpreadsheetService>) -> Self {
        Self { sheets }
    }

    /// Overwrite the sheet from A1 and auto-fit the first column.
    ///
    /// Rows left over from a longer previous write are not cleared. Returns
    /// the number of cells the provider reports as updated.
    #[instrument(skip(self, items), fields(spreadsheet_id = %target.id, items = items.len()))]
    pub async fn write_rows(&self, target: &TargetResource, items: &[RemoteItem]) -> Result<u64> {
        let rows: Vec<Row> = items.iter().map(to_row).collect();

        let updated_cells = self
            .sheets
            .write_range(&target.id, CellAnchor::ORIGIN, &rows, ValueInputMode::Raw)
            .await?;
        debug!(updated_cells, "Values written");

        self.sheets
            .auto_resize_columns(&target.id, SHEET_ID, 0, 1)
            .await?;

        info!("Wrote {} rows ({} cells)", rows.len(), updated_cells);
        Ok(updated_cells)
    }
}
