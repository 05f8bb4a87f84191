//! Remote Storage Abstractions
//!
//! Provides the provider-agnostic contract for enumerating the remote storage
//! provider's items and for locating the tabular sink by name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of one remote entry
///
/// Only the fields mirrored into the sink are kept. The provider's own
/// identifier is intentionally dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl RemoteItem {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            created_at,
        }
    }
}

/// One page of a paginated listing
///
/// `next_page_token == None` marks the final page. A `Some` token must be
/// submitted verbatim to fetch the following page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePage {
    pub items: Vec<RemoteItem>,
    pub next_page_token: Option<String>,
}

impl FilePage {
    pub fn new(items: Vec<RemoteItem>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}

/// The tabular sink a cycle writes into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetResource {
    pub id: String,
    pub name: String,
}

impl TargetResource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Remote storage provider trait
///
/// Abstracts the storage provider's file index:
/// - Google Drive: `files.list` / `files.get`
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::StorageProvider;
///
/// async fn first_page(provider: &dyn StorageProvider) -> Result<usize> {
///     let page = provider.list_files("trashed = false", 10, None).await?;
///     Ok(page.items.len())
/// }
/// ```
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Fetch one page of items matching `query`
    ///
    /// # Arguments
    ///
    /// * `query` - Provider filter expression
    /// * `page_size` - Maximum items per page
    /// * `page_token` - Continuation token from the previous page, `None` for the first
    async fn list_files(
        &self,
        query: &str,
        page_size: u32,
        page_token: Option<String>,
    ) -> Result<FilePage>;

    /// Find every non-trashed resource whose name equals `name` exactly
    ///
    /// Matches are returned in provider order.
    async fn find_by_name(&self, name: &str) -> Result<Vec<TargetResource>>;

    /// Resolve a resource by its storage-level id
    async fn get_file(&self, id: &str) -> Result<TargetResource>;
}
