use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Invalid client secrets: {0}")]
    InvalidClientSecrets(String),

    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),

    #[error("Token store error: {0}")]
    TokenStore(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl From<AuthError> for BridgeError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Bridge(BridgeError::Transport(msg)) => BridgeError::Transport(msg),
            other => BridgeError::Unauthorized(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_become_unauthorized() {
        let error: BridgeError = AuthError::TokenRefreshFailed("revoked".to_string()).into();
        assert!(matches!(error, BridgeError::Unauthorized(msg) if msg.contains("revoked")));
    }

    #[test]
    fn test_transport_errors_stay_transport() {
        let error: BridgeError =
            AuthError::Bridge(BridgeError::Transport("connection reset".to_string())).into();
        assert!(matches!(error, BridgeError::Transport(_)));
    }
}
