//! Entities.

use chrono::{DateTime, Utc};

use super::value_object::{MessageId, RoomId, UserId};

/// A chat message as it travels through the hub.
///
/// `sent_at` is assigned by the server when the inbound frame is decoded,
/// never taken from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub sender: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(room_id: RoomId, sender: UserId, content: String, sent_at: DateTime<Utc>) -> Self {
        Self {
            room_id,
            sender,
            content,
            sent_at,
        }
    }
}

/// A chat message as recorded in the durable log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub sender: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl StoredMessage {
    /// Record a message under a freshly generated id
    pub fn record(message: ChatMessage) -> Self {
        Self {
            id: MessageId::generate(),
            room_id: message.room_id,
            sender: message.sender,
            content: message.content,
            sent_at: message.sent_at,
        }
    }
}

/// Live room as seen by the hub at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub members: usize,
}
