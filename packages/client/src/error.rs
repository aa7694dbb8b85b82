//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the upgrade (e.g. blank user or room)
    #[error("Server rejected the connection: {0}")]
    Rejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

impl ClientError {
    /// Whether retrying the same request can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
