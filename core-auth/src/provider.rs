//! Cached, self-refreshing access token provider

use async_trait::async_trait;
use bridge_traits::auth::AccessTokenProvider;
use bridge_traits::error::Result as BridgeResult;
use bridge_traits::time::Clock;
use core_runtime::logging::redact_if_sensitive;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{AuthError, Result};
use crate::oauth::OAuthRefresher;
use crate::token_store::FileTokenStore;
use crate::types::StoredToken;

/// [`AccessTokenProvider`] backed by a [`FileTokenStore`]
///
/// The token is read from disk once and kept in memory. When it is within the
/// expiry buffer and a refresh token is available, it is refreshed through
/// [`OAuthRefresher`] and written back to the store.
pub struct CachedTokenProvider {
    store: FileTokenStore,
    refresher: Option<OAuthRefresher>,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<StoredToken>>,
}

impl CachedTokenProvider {
    pub fn new(
        store: FileTokenStore,
        refresher: Option<OAuthRefresher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            refresher,
            clock,
            cached: Mutex::new(None),
        }
    }

    async fn current_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if cached.is_none() {
            *cached = self.store.load().await?;
        }

        let token = cached.as_ref().ok_or_else(|| {
            AuthError::NotAuthenticated(format!(
                "no token at {}; complete the consent flow first",
                self.store.path().display()
            ))
        })?;

        let now = self.clock.now();
        if !token.needs_refresh(now) {
            return Ok(token.access_token.clone());
        }

        let refresh_token = token.refresh_token.clone();
        let stale_access_token = token.access_token.clone();

        match (&self.refresher, refresh_token) {
            (Some(refresher), Some(refresh_token)) => {
                let refreshed = refresher.refresh(&refresh_token, now).await?;
                self.store.save(&refreshed).await?;
                debug!(
                    access_token = %redact_if_sensitive("access_token", &refreshed.access_token),
                    "Using refreshed token"
                );
                let access_token = refreshed.access_token.clone();
                *cached = Some(refreshed);
                Ok(access_token)
            }
            _ => {
                warn!("Access token is near expiry and cannot be refreshed");
                Ok(stale_access_token)
            }
        }
    }
}

#[async_trait]
impl AccessTokenProvider for CachedTokenProvider {
    async fn access_token(&self) -> BridgeResult<String> {
        Ok(self.current_token().await?)
    }
}
