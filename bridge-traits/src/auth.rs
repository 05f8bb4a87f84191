//! Access Token Abstraction
//!
//! Connectors ask for a bearer token before every request. How the token is
//! obtained, cached and refreshed is owned by the credential collaborator.

use async_trait::async_trait;

use crate::error::Result;

/// Source of OAuth 2.0 bearer tokens
///
/// Implementations must return a token that is valid at the time of the call.
/// A token that cannot be produced (missing consent, revoked refresh token)
/// is reported as [`BridgeError::Unauthorized`](crate::error::BridgeError::Unauthorized).
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a currently valid access token
    async fn access_token(&self) -> Result<String>;
}

/// Provider returning a fixed token
///
/// Useful for tests and for short-lived runs with a token minted elsewhere.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
