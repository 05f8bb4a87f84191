//! Periodically mirrors the name and creation date of every non-trashed
//! Google Drive file into a Google Sheets spreadsheet.
//!
//! Settings are fixed at build time. `RUST_LOG` overrides the log filter.

use anyhow::Context;
use bridge_desktop::ReqwestHttpClient;
use bridge_traits::auth::AccessTokenProvider;
use bridge_traits::http::HttpClient;
use bridge_traits::time::{Clock, LogLevel, SystemClock};
use core_auth::{CachedTokenProvider, ClientSecrets, FileTokenStore, OAuthRefresher};
use core_runtime::logging::{init_logging, LoggingConfig};
use core_runtime::SyncConfig;
use core_sync::{SyncCycle, SyncScheduler};
use provider_google_drive::GoogleDriveConnector;
use provider_google_sheets::GoogleSheetsConnector;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut logging = LoggingConfig::default().with_level(LogLevel::Info);
    if let Ok(filter) = std::env::var("RUST_LOG") {
        logging = logging.with_filter(filter);
    }
    init_logging(logging)?;

    let config = SyncConfig::builder().build()?;
    info!(
        sink_name = %config.sink_name,
        page_size = config.page_size,
        interval_secs = config.poll_interval.as_secs(),
        "Starting sync job"
    );

    let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let secrets = ClientSecrets::load(&config.credentials_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load client secrets from {}",
                config.credentials_path.display()
            )
        })?;
    let token_provider: Arc<dyn AccessTokenProvider> = Arc::new(CachedTokenProvider::new(
        FileTokenStore::new(&config.token_store_path),
        Some(OAuthRefresher::new(secrets, http_client.clone())),
        clock.clone(),
    ));

    let drive = Arc::new(GoogleDriveConnector::new(
        http_client.clone(),
        token_provider.clone(),
        config.application_id.clone(),
    ));
    let sheets = Arc::new(GoogleSheetsConnector::new(
        http_client,
        token_provider,
        config.application_id.clone(),
    ));

    let cycle = SyncCycle::from_config(&config, drive, sheets, clock);
    let scheduler = SyncScheduler::new(
        Arc::new(cycle),
        config.poll_interval,
        config.failure_policy,
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown requested");
                on_signal.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    scheduler.run(cancel).await?;
    info!("Sync job stopped");
    Ok(())
}
