//! OAuth 2.0 token refresh
//!
//! Exchanges a long-lived refresh token for a new access token at the client's
//! token endpoint (`grant_type=refresh_token`).

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{AuthError, Result};
use crate::types::{ClientSecrets, StoredToken};

/// Performs refresh-token grants for one OAuth client
pub struct OAuthRefresher {
    secrets: ClientSecrets,
    http_client: Arc<dyn HttpClient>,
}

impl OAuthRefresher {
    pub fn new(secrets: ClientSecrets, http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            secrets,
            http_client,
        }
    }

    /// Refresh an access token using a refresh token.
    ///
    /// The returned token keeps `refresh_token` when the endpoint does not
    /// rotate it.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TokenRefreshFailed`] if the endpoint rejects the grant
    /// - [`AuthError::Bridge`] if the request could not be sent
    #[instrument(skip(self, refresh_token, now))]
    pub async fn refresh(&self, refresh_token: &str, now: DateTime<Utc>) -> Result<StoredToken> {
        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.secrets.client_id.as_str()),
        ];
        if let Some(ref client_secret) = self.secrets.client_secret {
            params.push(("client_secret", client_secret.as_str()));
        }

        let encoded_body = serde_urlencoded::to_string(&params).map_err(|e| {
            AuthError::TokenRefreshFailed(format!("Failed to encode token request: {}", e))
        })?;

        debug!(token_uri = %self.secrets.token_uri, "Refreshing access token");

        let request = HttpRequest::new(HttpMethod::Post, self.secrets.token_uri.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Bytes::from(encoded_body));

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            let error_body = response.text_lossy();
            warn!(status = response.status, "Token endpoint rejected refresh");
            return Err(AuthError::TokenRefreshFailed(format!(
                "Token endpoint returned {}: {}",
                response.status, error_body
            )));
        }

        let token_response: TokenResponse = response.json().map_err(|e| {
            AuthError::TokenRefreshFailed(format!("Failed to parse token response: {}", e))
        })?;

        info!(
            "Refreshed access token (expires in {}s)",
            token_response.expires_in
        );

        Ok(StoredToken::new(
            token_response.access_token,
            token_response
                .refresh_token
                .or_else(|| Some(refresh_token.to_string())),
            token_response.expires_in,
            now,
        ))
    }
}

/// JSON body returned by the token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}
