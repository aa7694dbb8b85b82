//! Domain layer: value objects, entities and the ports the server depends on.

pub mod broadcaster;
pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use broadcaster::{MessageBroadcaster, RoomDirectory};
pub use entity::{ChatMessage, RoomSummary, StoredMessage};
pub use error::{HubError, RepositoryError, ValueObjectError};
pub use repository::MessageRepository;
pub use value_object::{ConnectionId, MessageId, RoomId, UserId};

#[cfg(test)]
pub use broadcaster::{MockMessageBroadcaster, MockRoomDirectory};
#[cfg(test)]
pub use repository::MockMessageRepository;
