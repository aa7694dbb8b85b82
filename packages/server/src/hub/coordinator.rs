//! Hub coordinator task.

use tokio::{sync::mpsc, task::JoinHandle};

use super::{command::HubCommand, handle::HubHandle, registry::RoomRegistry};

/// The single owner of the [`RoomRegistry`].
///
/// Runs until every [`HubHandle`] has been dropped.
pub struct Hub {
    registry: RoomRegistry,
    intake: mpsc::Receiver<HubCommand>,
}

impl Hub {
    /// Create a hub with a bounded intake queue
    pub fn new(intake_capacity: usize) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::channel(intake_capacity);
        let hub = Self {
            registry: RoomRegistry::new(),
            intake: rx,
        };
        (hub, HubHandle::new(tx))
    }

    /// Create a hub and spawn its coordinator on the current runtime
    pub fn spawn(intake_capacity: usize) -> (HubHandle, JoinHandle<()>) {
        let (hub, handle) = Self::new(intake_capacity);
        let task = tokio::spawn(hub.run());
        (handle, task)
    }

    pub async fn run(mut self) {
        tracing::debug!("Hub coordinator started");
        while let Some(command) = self.intake.recv().await {
            self.apply(command);
        }
        tracing::debug!(
            "Hub coordinator stopped with {} live rooms",
            self.registry.room_count()
        );
    }

    fn apply(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(connection) => self.registry.register(connection),
            HubCommand::Unregister {
                room_id,
                connection_id,
            } => {
                if !self.registry.unregister(&room_id, &connection_id) {
                    tracing::debug!(
                        "Connection {} was not a member of room '{}'",
                        connection_id,
                        room_id
                    );
                }
            }
            HubCommand::Broadcast(message) => {
                let room_id = message.room_id.clone();
                let outcome = self.registry.broadcast(message);
                tracing::debug!(
                    "Broadcast to room '{}': delivered={}, evicted={}",
                    room_id,
                    outcome.delivered,
                    outcome.evicted.len()
                );
            }
            HubCommand::Rooms(reply) => {
                // The requester may have given up waiting.
                let _ = reply.send(self.registry.summaries());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, ConnectionId, HubError, RoomId, RoomSummary, UserId},
        hub::handle::{ConnectionHandle, MailboxReceiver, mailbox},
    };
    use chrono::Utc;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn connection(
        room_id: &str,
        user: &str,
        capacity: usize,
    ) -> (ConnectionHandle, MailboxReceiver) {
        let (tx, rx) = mailbox(capacity);
        let handle = ConnectionHandle::new(
            ConnectionId::generate(),
            room(room_id),
            UserId::new(user.to_string()).unwrap(),
            tx,
        );
        (handle, rx)
    }

    fn message(room_id: &str, sender: &str, content: &str) -> ChatMessage {
        ChatMessage::new(
            room(room_id),
            UserId::new(sender.to_string()).unwrap(),
            content.to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_scenario_message_reaches_room_peer() {
        // given: userA and userB are in room "42"
        let (hub, _task) = Hub::spawn(16);
        let (user_a, mut rx_a) = connection("42", "userA", 8);
        let (user_b, mut rx_b) = connection("42", "userB", 8);
        hub.register(user_a).await.unwrap();
        hub.register(user_b).await.unwrap();

        // when:
        hub.broadcast(message("42", "userA", "hi")).await.unwrap();

        // then:
        let received = rx_b.recv().await.unwrap();
        assert_eq!(received.room_id.as_str(), "42");
        assert_eq!(received.sender.as_str(), "userA");
        assert_eq!(received.content, "hi");
        assert_eq!(rx_a.recv().await.unwrap().content, "hi");
    }

    #[tokio::test]
    async fn test_scenario_saturated_peer_is_evicted() {
        // given: userB's mailbox is already full
        let (hub, _task) = Hub::spawn(16);
        let (user_a, mut rx_a) = connection("42", "userA", 8);
        let (user_b, mut rx_b) = connection("42", "userB", 1);
        hub.register(user_a).await.unwrap();
        hub.register(user_b).await.unwrap();
        hub.broadcast(message("42", "userA", "backlog")).await.unwrap();

        // when:
        hub.broadcast(message("42", "userA", "hi")).await.unwrap();

        // then:
        let rooms = hub.rooms().await.unwrap();
        assert_eq!(
            rooms,
            vec![RoomSummary {
                room_id: room("42"),
                members: 1
            }]
        );
        assert_eq!(rx_b.recv().await.unwrap().content, "backlog");
        assert!(rx_b.recv().await.is_none());
        assert_eq!(rx_a.recv().await.unwrap().content, "backlog");
        assert_eq!(rx_a.recv().await.unwrap().content, "hi");
    }

    #[tokio::test]
    async fn test_scenario_last_member_leaving_drops_room() {
        // given:
        let (hub, _task) = Hub::spawn(16);
        let (member, mut rx) = connection("7", "solo", 4);
        let member_id = member.id;
        hub.register(member).await.unwrap();
        assert_eq!(hub.rooms().await.unwrap().len(), 1);

        // when:
        hub.unregister(room("7"), member_id).await.unwrap();

        // then:
        assert!(hub.rooms().await.unwrap().is_empty());
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_unregister_twice_is_harmless() {
        // given:
        let (hub, _task) = Hub::spawn(16);
        let (member, _rx) = connection("7", "solo", 4);
        let member_id = member.id;
        hub.register(member).await.unwrap();

        // when:
        let first = hub.unregister(room("7"), member_id).await;
        let second = hub.unregister(room("7"), member_id).await;
        let unknown = hub.unregister(room("never"), ConnectionId::generate()).await;

        // then:
        assert!(first.is_ok() && second.is_ok() && unknown.is_ok());
        assert!(hub.rooms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_intents_are_applied_in_submission_order() {
        // given: a member that registers and leaves between two broadcasts
        let (hub, _task) = Hub::spawn(16);
        let (member, mut rx) = connection("9", "bob", 8);
        let member_id = member.id;

        // when:
        hub.broadcast(message("9", "alice", "before")).await.unwrap();
        hub.register(member).await.unwrap();
        hub.broadcast(message("9", "alice", "during")).await.unwrap();
        hub.unregister(room("9"), member_id).await.unwrap();
        hub.broadcast(message("9", "alice", "after")).await.unwrap();

        // then:
        assert_eq!(rx.recv().await.unwrap().content, "during");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_handle_reports_unavailable_after_coordinator_stops() {
        // given:
        let (hub, handle) = Hub::new(4);
        drop(hub);

        // when:
        let result = handle.broadcast(message("1", "alice", "hello")).await;

        // then:
        assert_eq!(result, Err(HubError::Unavailable));
        assert_eq!(handle.rooms().await, Err(HubError::Unavailable));
    }

    #[tokio::test]
    async fn test_coordinator_exits_when_all_handles_dropped() {
        // given:
        let (hub, task) = Hub::spawn(4);

        // when:
        drop(hub);

        // then:
        assert!(task.await.is_ok());
    }
}
