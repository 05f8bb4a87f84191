//! Error types for Google Drive provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Google Drive provider errors
#[derive(Error, Debug)]
pub enum GoogleDriveError {
    /// Token rejected (401) or scope insufficient (403)
    #[error("Authentication failed (status {status_code}): {message}")]
    AuthenticationFailed { status_code: u16, message: String },

    /// Server-side failure (5xx) or throttling (429)
    #[error("Google Drive unavailable (status {status_code}): {message}")]
    Unavailable { status_code: u16, message: String },

    /// Any other non-success response
    #[error("Google Drive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// File not found
    #[error("File not found: {file_id}")]
    FileNotFound { file_id: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] BridgeError),
}

/// Result type for Google Drive operations
pub type Result<T> = std::result::Result<T, GoogleDriveError>;

impl GoogleDriveError {
    /// Classify a non-success HTTP status
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => GoogleDriveError::AuthenticationFailed {
                status_code,
                message,
            },
            429 | 500..=599 => GoogleDriveError::Unavailable {
                status_code,
                message,
            },
            _ => GoogleDriveError::ApiError {
                status_code,
                message,
            },
        }
    }
}

impl From<GoogleDriveError> for BridgeError {
    fn from(error: GoogleDriveError) -> Self {
        match error {
            GoogleDriveError::AuthenticationFailed { .. } => {
                BridgeError::Unauthorized(error.to_string())
            }
            GoogleDriveError::Unavailable { .. } => BridgeError::Transport(error.to_string()),
            GoogleDriveError::ApiError {
                status_code,
                message,
            } => BridgeError::Api {
                status: status_code,
                message,
            },
            GoogleDriveError::FileNotFound { .. } => BridgeError::Api {
                status: 404,
                message: error.to_string(),
            },
            GoogleDriveError::ParseError(msg) => BridgeError::InvalidResponse(msg),
            GoogleDriveError::BridgeError(e) => e,
        }
    }
}
