//! Use case errors.

use thiserror::Error;

/// Failure of the real-time send path.
///
/// Persistence failures are not represented: they are logged and the
/// message is still broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("hub is unavailable")]
    HubUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetHistoryError {
    #[error("message store error: {0}")]
    Repository(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomsError {
    #[error("hub is unavailable")]
    HubUnavailable,
}
