use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
