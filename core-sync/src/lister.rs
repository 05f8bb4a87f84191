//! Full listing of non-trashed remote items
//!
//! Walks the provider's page tokens until the last page and returns every
//! item in provider order.

use bridge_traits::storage::{RemoteItem, StorageProvider};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::error::Result;

/// Provider query selecting every item not in the trash
pub const NOT_TRASHED_QUERY: &str = "trashed = false";

/// Lists every non-trashed item of a storage provider
pub struct RemoteLister {
    provider: Arc<dyn StorageProvider>,
    page_size: u32,
}

impl RemoteLister {
    pub fn new(provider: Arc<dyn StorageProvider>, page_size: u32) -> Self {
        Self {
            provider,
            page_size,
        }
    }

    /// Fetch all pages and concatenate them
    ///
    /// The first failing page aborts the listing; nothing partial is returned.
    #[instrument(skip(self), fields(page_size = self.page_size))]
    pub async fn list_all(&self) -> Result<Vec<RemoteItem>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0u32;

        loop {
            page_count += 1;

            let page = self
                .provider
                .list_files(NOT_TRASHED_QUERY, self.page_size, page_token.take())
                .await?;

            items.extend(page.items);
            debug!(page = page_count, total = items.len(), "Fetched page");

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        info!("Listed {} items in {} page(s)", items.len(), page_count);
        Ok(items)
    }
}
