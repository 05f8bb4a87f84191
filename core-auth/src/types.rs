//! Credential data types
//!
//! Serde models for the OAuth client secrets file and the persisted token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AuthError, Result};

/// Google's default token endpoint, used when `credentials.json` omits it
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Refresh this long before the recorded expiry
const EXPIRY_BUFFER_SECS: i64 = 300;

/// OAuth client identity loaded from `credentials.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The downloaded file nests the client under `installed` (desktop apps) or
/// `web` (web apps).
#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Parse the contents of a client secrets file
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ClientSecretsFile = serde_json::from_str(json)
            .map_err(|e| AuthError::InvalidClientSecrets(e.to_string()))?;

        file.installed.or(file.web).ok_or_else(|| {
            AuthError::InvalidClientSecrets(
                "expected an \"installed\" or \"web\" section".to_string(),
            )
        })
    }

    /// Read and parse a client secrets file from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AuthError::InvalidClientSecrets(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

/// Token persisted between process runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absent means the expiry is unknown; such a token is treated as expired
    /// whenever a refresh token is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: Some(now + Duration::seconds(expires_in_secs)),
        }
    }

    /// True when the access token is expired or will be within the buffer
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now + Duration::seconds(EXPIRY_BUFFER_SECS) >= expires_at,
            None => self.refresh_token.is_some(),
        }
    }
}
