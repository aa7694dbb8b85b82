//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be blank")]
    BlankRoomId,

    #[error("user id must not be blank")]
    BlankUserId,
}

/// Persistence port errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Hub errors.
///
/// Only one failure mode exists from the caller's side: the coordinator task
/// has stopped and can no longer accept intents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HubError {
    #[error("hub coordinator is not running")]
    Unavailable,
}
