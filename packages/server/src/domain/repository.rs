//! Persistence port.
//!
//! The hub's read path appends every decoded message here; the history
//! endpoint reads it back.

use async_trait::async_trait;

use super::{ChatMessage, RepositoryError, RoomId, StoredMessage};

/// Durable message log
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message and return it as stored
    async fn append_message(
        &self,
        message: ChatMessage,
    ) -> Result<StoredMessage, RepositoryError>;

    /// Messages of a room ordered by `sent_at` ascending, insertion order on ties
    async fn get_history(&self, room_id: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError>;
}
