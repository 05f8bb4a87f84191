//! One sync cycle: list, resolve, write

use async_trait::async_trait;
use bridge_traits::sheets::SpreadsheetService;
use bridge_traits::storage::{StorageProvider, TargetResource};
use bridge_traits::time::Clock;
use chrono::{DateTime, Local, Utc};
use core_runtime::SyncConfig;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::error::Result;
use crate::lister::RemoteLister;
use crate::resolver::SinkResolver;
use crate::writer::SinkWriter;

/// Outcome of a successful cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub items_listed: usize,
    pub sink: TargetResource,
    pub updated_cells: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CycleReport {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Unit of work driven by [`SyncScheduler`](crate::scheduler::SyncScheduler)
#[async_trait]
pub trait CycleRunner: Send + Sync {
    async fn run_cycle(&self) -> Result<CycleReport>;
}

/// Mirrors the remote listing into the sink spreadsheet
///
/// Holds no state between runs; every cycle lists and resolves from scratch.
pub struct SyncCycle {
    lister: RemoteLister,
    resolver: SinkResolver,
    writer: SinkWriter,
    clock: Arc<dyn Clock>,
}

impl SyncCycle {
    pub fn new(
        lister: RemoteLister,
        resolver: SinkResolver,
        writer: SinkWriter,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            lister,
            resolver,
            writer,
            clock,
        }
    }

    /// Wire the three stages from a validated configuration
    pub fn from_config(
        config: &SyncConfig,
        storage: Arc<dyn StorageProvider>,
        sheets: Arc<dyn SpreadsheetService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            RemoteLister::new(storage.clone(), config.page_size),
            SinkResolver::new(
                storage,
                sheets.clone(),
                config.sink_name.clone(),
                config.duplicate_policy,
            ),
            SinkWriter::new(sheets),
            clock,
        )
    }
}

#[async_trait]
impl CycleRunner for SyncCycle {
    #[instrument(skip(self), fields(sink_name = %self.resolver.sink_name()))]
    async fn run_cycle(&self) -> Result<CycleReport> {
        let started_at = self.clock.now();

        let items = self.lister.list_all().await?;
        let sink = self.resolver.get_or_create().await?;
        let updated_cells = self.writer.write_rows(&sink, &items).await?;

        let finished_at = self.clock.now();
        info!(
            at = %finished_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
            spreadsheet_id = %sink.id,
            updated_cells,
            "Spreadsheet updated"
        );

        Ok(CycleReport {
            items_listed: items.len(),
            sink,
            updated_cells,
            started_at,
            finished_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::sheets::{CellAnchor, Row, ValueInputMode};
    use bridge_traits::storage::{FilePage, RemoteItem};
    use chrono::{Duration, TimeZone};
    use mockall::mock;
    use std::sync::Mutex;

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

    /// Advances one second per reading
    struct SteppingClock(Mutex<DateTime<Utc>>);

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut current = self.0.lock().unwrap();
            let now = *current;
            *current = now + Duration::seconds(1);
            now
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn config() -> SyncConfig {
        SyncConfig::builder().page_size(50).build().unwrap()
    }

    #[tokio::test]
    async fn test_cycle_report() {
        let mut storage = MockStorage::new();
        storage
            .expect_list_files()
            .withf(|_, page_size, _| *page_size == 50)
            .times(1)
            .returning(|_, _, _| {
                Ok(FilePage::new(
                    vec![RemoteItem::new(
                        "a.txt",
                        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
                    )],
                    None,
                ))
            });
        storage
            .expect_find_by_name()
            .times(1)
            .returning(|name| Ok(vec![TargetResource::new("sheet-1", name)]));

        let mut sheets = MockSheets::new();
        sheets
            .expect_write_range()
            .times(1)
            .returning(|_, _, rows, _| Ok(rows.len() as u64 * 2));
        sheets
            .expect_auto_resize_columns()
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let cycle = SyncCycle::from_config(
            &config(),
            Arc::new(storage),
            Arc::new(sheets),
            Arc::new(SteppingClock(Mutex::new(start()))),
        );

        let report = cycle.run_cycle().await.unwrap();
        assert_eq!(report.items_listed, 1);
        assert_eq!(report.sink, TargetResource::new("sheet-1", "AllFilesSpreadsheet"));
        assert_eq!(report.updated_cells, 2);
        assert_eq!(report.started_at, start());
        assert_eq!(report.duration(), Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_listing_failure_stops_cycle() {
        let mut storage = MockStorage::new();
        storage
            .expect_list_files()
            .returning(|_, _, _| Err(BridgeError::Unauthorized("token revoked".to_string())));
        storage.expect_find_by_name().times(0);

        let mut sheets = MockSheets::new();
        sheets.expect_write_range().times(0);

        let cycle = SyncCycle::from_config(
            &config(),
            Arc::new(storage),
            Arc::new(sheets),
            Arc::new(SteppingClock(Mutex::new(start()))),
        );

        let result = cycle.run_cycle().await;
        assert!(matches!(result, Err(SyncError::Auth(_))));
    }
}
