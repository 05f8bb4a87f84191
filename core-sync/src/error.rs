use bridge_traits::error::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl From<BridgeError> for SyncError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::Unauthorized(msg) => SyncError::Auth(msg),
            BridgeError::Transport(msg) => SyncError::Transport(msg),
            BridgeError::Api { status, message } => SyncError::Provider { status, message },
            BridgeError::InvalidResponse(msg) => SyncError::InvalidResponse(msg),
            other => SyncError::Transport(other.to_string()),
        }
    }
}

impl From<core_runtime::Error> for SyncError {
    fn from(error: core_runtime::Error) -> Self {
        SyncError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_error_classification() {
        assert!(matches!(
            SyncError::from(BridgeError::Unauthorized("expired".to_string())),
            SyncError::Auth(_)
        ));
        assert!(matches!(
            SyncError::from(BridgeError::Api {
                status: 400,
                message: "bad query".to_string()
            }),
            SyncError::Provider { status: 400, .. }
        ));
        assert!(matches!(
            SyncError::from(BridgeError::InvalidResponse("bad date".to_string())),
            SyncError::InvalidResponse(_)
        ));
        assert!(matches!(
            SyncError::from(BridgeError::NotAvailable("offline".to_string())),
            SyncError::Transport(_)
        ));
    }

    #[test]
    fn test_config_error_conversion() {
        let error: SyncError = core_runtime::Error::Config("page size".to_string()).into();
        assert!(matches!(error, SyncError::Config(msg) if msg.contains("page size")));
    }
}
