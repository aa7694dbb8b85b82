//! Narrow views of the hub used by the use case layer.

use async_trait::async_trait;

use super::{ChatMessage, HubError, RoomSummary};

/// Fan-out of a message to every live member of its room
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageBroadcaster: Send + Sync {
    async fn broadcast(&self, message: ChatMessage) -> Result<(), HubError>;
}

/// Read-only listing of live rooms
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn rooms(&self) -> Result<Vec<RoomSummary>, HubError>;
}
