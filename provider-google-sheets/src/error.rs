//! Error types for Google Sheets provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Google Sheets provider errors
#[derive(Error, Debug)]
pub enum GoogleSheetsError {
    /// Token rejected (401) or caller lacks access to the spreadsheet (403)
    #[error("Authentication failed (status {status_code}): {message}")]
    AuthenticationFailed { status_code: u16, message: String },

    /// Server-side failure (5xx) or quota exhaustion (429)
    #[error("Google Sheets unavailable (status {status_code}): {message}")]
    Unavailable { status_code: u16, message: String },

    /// Any other non-success response
    #[error("Google Sheets API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Spreadsheet does not exist
    #[error("Spreadsheet not found: {spreadsheet_id}")]
    SpreadsheetNotFound { spreadsheet_id: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] BridgeError),
}

/// Result type for Google Sheets operations
pub type Result<T> = std::result::Result<T, GoogleSheetsError>;

impl GoogleSheetsError {
    /// Classify a non-success HTTP status
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => GoogleSheetsError::AuthenticationFailed {
                status_code,
                message,
            },
            429 | 500..=599 => GoogleSheetsError::Unavailable {
                status_code,
                message,
            },
            _ => GoogleSheetsError::ApiError {
                status_code,
                message,
            },
        }
    }
}

impl From<GoogleSheetsError> for BridgeError {
    fn from(error: GoogleSheetsError) -> Self {
        match error {
            GoogleSheetsError::AuthenticationFailed { .. } => {
                BridgeError::Unauthorized(error.to_string())
            }
            GoogleSheetsError::Unavailable { .. } => BridgeError::Transport(error.to_string()),
            GoogleSheetsError::ApiError {
                status_code,
                message,
            } => BridgeError::Api {
                status: status_code,
                message,
            },
            GoogleSheetsError::SpreadsheetNotFound { .. } => BridgeError::Api {
                status: 404,
                message: error.to_string(),
            },
            GoogleSheetsError::ParseError(msg) => BridgeError::InvalidResponse(msg),
            GoogleSheetsError::BridgeError(e) => e,
        }
    }
}
