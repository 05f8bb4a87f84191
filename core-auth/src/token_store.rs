//! File Token Storage
//!
//! Persists the OAuth token as a small JSON document so that a restarted
//! process can keep syncing without repeating the consent flow.
//!
//! ## Example
//!
//! ```no_run
//! use core_auth::{FileTokenStore, StoredToken};
//! # async fn example() -> core_auth::Result<()> {
//! let store = FileTokenStore::new("user-token");
//!
//! if let Some(token) = store.load().await? {
//!     store.save(&token).await?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{AuthError, Result};
use crate::types::StoredToken;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// JSON file holding one [`StoredToken`]
///
/// The path names a single file. Stores written by other Google client
/// libraries use a directory of per-user files at the same default path; such
/// a directory is rejected with [`AuthError::NotAuthenticated`] rather than
/// read.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored token, `None` if the file does not exist
    pub async fn load(&self) -> Result<Option<StoredToken>> {
        if let Ok(metadata) = tokio::fs::metadata(&self.path).await {
            if metadata.is_dir() {
                return Err(AuthError::NotAuthenticated(format!(
                    "{} is a directory, expected a JSON token file; remove it and sign in again",
                    self.path.display()
                )));
            }
        }

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No stored token");
                return Ok(None);
            }
            Err(e) => {
                return Err(AuthError::TokenStore(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let token = serde_json::from_slice(&bytes).map_err(|e| {
            AuthError::TokenStore(format!("Corrupt token file {}: {}", self.path.display(), e))
        })?;

        Ok(Some(token))
    }

    /// Persist the token, replacing any previous one
    ///
    /// Writes to a sibling temporary file first and renames it into place so a
    /// crash never leaves a half-written token behind.
    pub async fn save(&self, token: &StoredToken) -> Result<()> {
        let json = serde_json::to_vec_pretty(token)
            .map_err(|e| AuthError::TokenStore(format!("Failed to encode token: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AuthError::TokenStore(format!("{}: {}", parent.display(), e)))?;
        }

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| AuthError::TokenStore(format!("{}: {}", tmp_path.display(), e)))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| AuthError::TokenStore(format!("{}: {}", self.path.display(), e)))?;

        info!(path = %self.path.display(), "Stored refreshed token");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("absent.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token.json"));
        let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let token = StoredToken {
            access_token: "ya29.a".to_string(),
            refresh_token: Some("1//r".to_string()),
            expires_at: Some(expires),
        };

        store.save(&token).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_directory_layout_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("user-token");
        std::fs::create_dir(&legacy).unwrap();
        std::fs::write(legacy.join("token-user"), b"{}").unwrap();

        let result = FileTokenStore::new(&legacy).load().await;
        assert!(
            matches!(result, Err(AuthError::NotAuthenticated(msg)) if msg.contains("is a directory"))
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let result = FileTokenStore::new(path).load().await;
        assert!(matches!(result, Err(AuthError::TokenStore(msg)) if msg.contains("Corrupt")));
    }
}
