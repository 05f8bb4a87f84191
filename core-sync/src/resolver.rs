//! Get-or-create resolution of the sink spreadsheet

use bridge_traits::sheets::SpreadsheetService;
use bridge_traits::storage::{StorageProvider, TargetResource};
use core_runtime::DuplicatePolicy;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::Result;

/// Finds the spreadsheet named `sink_name`, creating it when absent
pub struct SinkResolver {
    storage: Arc<dyn StorageProvider>,
    sheets: Arc<dyn SpreadsheetService>,
    sink_name: String,
    duplicate_policy: DuplicatePolicy,
}

impl SinkResolver {
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        sheets: Arc<dyn SpreadsheetService>,
        sink_name: impl Into<String>,
        duplicate_policy: DuplicatePolicy,
    ) -> Self {
        Self {
            storage,
            sheets,
            sink_name: sink_name.into(),
            duplicate_policy,
        }
    }

    pub fn sink_name(&self) -> &str {
        &self.sink_name
    }

    /// Return the existing sink, or create one and look it up by id.
    ///
    /// When several non-trashed files share the name, one is chosen by the
    /// configured [`DuplicatePolicy`] and the others are left alone.
    #[instrument(skip(self), fields(sink_name = %self.sink_name))]
    pub async fn get_or_create(&self) -> Result<TargetResource> {
        let matches = self.storage.find_by_name(&self.sink_name).await?;

        if matches.len() > 1 {
            warn!(
                count = matches.len(),
                policy = ?self.duplicate_policy,
                "Multiple spreadsheets share the sink name"
            );
        }

        if let Some(existing) = select(matches, self.duplicate_policy) {
            info!(spreadsheet_id = %existing.id, "Using existing spreadsheet");
            return Ok(existing);
        }

        info!("No spreadsheet found, creating one");
        let id = self.sheets.create_spreadsheet(&self.sink_name).await?;
        let created = self.storage.get_file(&id).await?;
        info!(spreadsheet_id = %created.id, "Created spreadsheet");

        Ok(created)
    }
}

fn select(matches: Vec<TargetResource>, policy: DuplicatePolicy) -> Option<TargetResource> {
    match policy {
        DuplicatePolicy::FirstReturned => matches.into_iter().next(),
        DuplicatePolicy::SmallestId => matches.into_iter().min_by(|a, b| a.id.cmp(&b.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::sheets::{CellAnchor, Row, ValueInputMode};
    use bridge_traits::storage::FilePage;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Storage {}

        #[async_trait]
        impl StorageProvider for Storage {
            async fn list_files(
                &self,
                query: &str,
                page_size: u32,
                page_token: Option<String>,
            ) -> BridgeResult<FilePage>;
            async fn find_by_name(&self, name: &str) -> BridgeResult<Vec<TargetResource>>;
            async fn get_file(&self, id: &str) -> BridgeResult<TargetResource>;
        }
    }

    mock! {
        Sheets {}

        #[async_trait]
        impl SpreadsheetService for Sheets {
            async fn create_spreadsheet(&self, title: &str) -> BridgeResult<String>;
            async fn write_range(
                &self,
                spreadsheet_id: &str,
                anchor: CellAnchor,
                rows: &[Row],
                mode: ValueInputMode,
            ) -> BridgeResult<u64>;
            async fn auto_resize_columns(
                &self,
                spreadsheet_id: &str,
                sheet_id: u32,
                start_index: u32,
                end_index: u32,
            ) -> BridgeResult<()>;
        }
    }

    fn target(id: &str) -> TargetResource {
        TargetResource::new(id, "AllFilesSpreadsheet")
    }

    fn resolver(storage: MockStorage, sheets: MockSheets, policy: DuplicatePolicy) -> SinkResolver {
        SinkResolver::new(
            Arc::new(storage),
            Arc::new(sheets),
            "AllFilesSpreadsheet",
            policy,
        )
    }

    #[tokio::test]
    async fn test_existing_sink_is_reused() {
        let mut storage = MockStorage::new();
        storage
            .expect_find_by_name()
            .with(eq("AllFilesSpreadsheet"))
            .times(1)
            .returning(|_| Ok(vec![target("sheet-1")]));
        storage.expect_get_file().times(0);

        let mut sheets = MockSheets::new();
        sheets.expect_create_spreadsheet().times(0);

        let resolved = resolver(storage, sheets, DuplicatePolicy::FirstReturned)
            .get_or_create()
            .await
            .unwrap();
        assert_eq!(resolved, target("sheet-1"));
    }

    #[tokio::test]
    async fn test_missing_sink_is_created_then_fetched() {
        let mut storage = MockStorage::new();
        storage
            .expect_find_by_name()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        storage
            .expect_get_file()
            .with(eq("new-sheet"))
            .times(1)
            .returning(|id| Ok(target(id)));

        let mut sheets = MockSheets::new();
        sheets
            .expect_create_spreadsheet()
            .with(eq("AllFilesSpreadsheet"))
            .times(1)
            .returning(|_| Ok("new-sheet".to_string()));

        let resolved = resolver(storage, sheets, DuplicatePolicy::FirstReturned)
            .get_or_create()
            .await
            .unwrap();
        assert_eq!(resolved, target("new-sheet"));
    }

    #[tokio::test]
    async fn test_duplicates_first_returned() {
        let mut storage = MockStorage::new();
        storage
            .expect_find_by_name()
            .returning(|_| Ok(vec![target("sheet-b"), target("sheet-a")]));

        let resolved = resolver(storage, MockSheets::new(), DuplicatePolicy::FirstReturned)
            .get_or_create()
            .await
            .unwrap();
        assert_eq!(resolved.id, "sheet-b");
    }

    #[tokio::test]
    async fn test_duplicates_smallest_id() {
        let mut storage = MockStorage::new();
        storage
            .expect_find_by_name()
            .returning(|_| Ok(vec![target("sheet-b"), target("sheet-a"), target("sheet-c")]));

        let resolved = resolver(storage, MockSheets::new(), DuplicatePolicy::SmallestId)
            .get_or_create()
            .await
            .unwrap();
        assert_eq!(resolved.id, "sheet-a");
    }

    #[tokio::test]
    async fn test_create_failure_propagates() {
        let mut storage = MockStorage::new();
        storage.expect_find_by_name().returning(|_| Ok(Vec::new()));
        storage.expect_get_file().times(0);

        let mut sheets = MockSheets::new();
        sheets
            .expect_create_spreadsheet()
            .returning(|_| Err(BridgeError::Unauthorized("insufficient scope".to_string())));

        let result = resolver(storage, sheets, DuplicatePolicy::FirstReturned)
            .get_or_create()
            .await;
        assert!(matches!(result, Err(SyncError::Auth(_))));
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(select(Vec::new(), DuplicatePolicy::SmallestId), None);
        assert_eq!(select(Vec::new(), DuplicatePolicy::FirstReturned), None);
    }
}
