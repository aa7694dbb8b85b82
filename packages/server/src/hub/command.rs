//! Intents accepted by the hub coordinator.

use tokio::sync::oneshot;

use crate::domain::{ChatMessage, ConnectionId, RoomId, RoomSummary};

use super::handle::ConnectionHandle;

/// One unit of work for the coordinator. Commands are applied strictly in
/// the order they are received.
#[derive(Debug)]
pub enum HubCommand {
    Register(ConnectionHandle),
    Unregister {
        room_id: RoomId,
        connection_id: ConnectionId,
    },
    Broadcast(ChatMessage),
    Rooms(oneshot::Sender<Vec<RoomSummary>>),
}
