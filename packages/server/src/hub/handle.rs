//! Handles exchanged between connections and the hub.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{
    ChatMessage, ConnectionId, HubError, MessageBroadcaster, RoomDirectory, RoomId, RoomSummary,
    UserId,
};

use super::command::HubCommand;

/// Sending half of a connection's outbound queue. The hub holds the only one.
pub type Mailbox = mpsc::Sender<Arc<ChatMessage>>;

/// Receiving half of a connection's outbound queue, drained by the write loop
pub type MailboxReceiver = mpsc::Receiver<Arc<ChatMessage>>;

/// Create a bounded mailbox
pub fn mailbox(capacity: usize) -> (Mailbox, MailboxReceiver) {
    mpsc::channel(capacity)
}

/// What the hub keeps for each member.
///
/// Dropping it drops the mailbox sender, which closes the mailbox: the write
/// loop drains what is left and then ends the connection.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub mailbox: Mailbox,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, room_id: RoomId, user_id: UserId, mailbox: Mailbox) -> Self {
        Self {
            id,
            room_id,
            user_id,
            mailbox,
        }
    }
}

/// Cloneable front door to the hub coordinator
#[derive(Debug, Clone)]
pub struct HubHandle {
    intake: mpsc::Sender<HubCommand>,
}

impl HubHandle {
    pub(super) fn new(intake: mpsc::Sender<HubCommand>) -> Self {
        Self { intake }
    }

    async fn submit(&self, command: HubCommand) -> Result<(), HubError> {
        self.intake
            .send(command)
            .await
            .map_err(|_| HubError::Unavailable)
    }

    /// Add a connection to its room, creating the room if needed
    pub async fn register(&self, connection: ConnectionHandle) -> Result<(), HubError> {
        self.submit(HubCommand::Register(connection)).await
    }

    /// Remove a connection from its room and close its mailbox. No-op if absent.
    pub async fn unregister(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
    ) -> Result<(), HubError> {
        self.submit(HubCommand::Unregister {
            room_id,
            connection_id,
        })
        .await
    }

    /// Fan a message out to every member of its room
    pub async fn broadcast(&self, message: ChatMessage) -> Result<(), HubError> {
        self.submit(HubCommand::Broadcast(message)).await
    }

    /// Snapshot of live rooms, ordered by room id
    pub async fn rooms(&self) -> Result<Vec<RoomSummary>, HubError> {
        let (reply, response) = oneshot::channel();
        self.submit(HubCommand::Rooms(reply)).await?;
        response.await.map_err(|_| HubError::Unavailable)
    }
}

#[async_trait]
impl MessageBroadcaster for HubHandle {
    async fn broadcast(&self, message: ChatMessage) -> Result<(), HubError> {
        HubHandle::broadcast(self, message).await
    }
}

#[async_trait]
impl RoomDirectory for HubHandle {
    async fn rooms(&self) -> Result<Vec<RoomSummary>, HubError> {
        HubHandle::rooms(self).await
    }
}
