//! UseCase: send a chat message from a live connection.
//!
//! Stamps the message with server time, appends it to the durable log and
//! hands it to the hub for fan-out. A failed append does not stop the
//! broadcast.

use std::sync::Arc;

use sparks_shared::time::Clock;

use crate::domain::{ChatMessage, MessageBroadcaster, MessageRepository, RoomId, UserId};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn MessageRepository>,
    broadcaster: Arc<dyn MessageBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn MessageRepository>,
        broadcaster: Arc<dyn MessageBroadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            broadcaster,
            clock,
        }
    }

    /// Send `content` from `sender` to everyone in `room_id`
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - the message as broadcast, with its server timestamp
    /// * `Err(SendMessageError::HubUnavailable)` - the hub no longer accepts intents
    pub async fn execute(
        &self,
        room_id: RoomId,
        sender: UserId,
        content: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let message = ChatMessage::new(room_id, sender, content, self.clock.now());

        match self.repository.append_message(message.clone()).await {
            Ok(stored) => {
                tracing::debug!("Persisted message {} from '{}'", stored.id, stored.sender);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to persist message from '{}' in room '{}': {}",
                    message.sender,
                    message.room_id,
                    e
                );
            }
        }

        self.broadcaster
            .broadcast(message.clone())
            .await
            .map_err(|_| SendMessageError::HubUnavailable)?;

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        HubError, MockMessageBroadcaster, MockMessageRepository, RepositoryError, StoredMessage,
    };
    use mockall::{Sequence, predicate::always};
    use sparks_shared::time::FixedClock;

    const NOW: i64 = 1_700_000_000;

    fn ids() -> (RoomId, UserId) {
        (
            RoomId::new("42".to_string()).unwrap(),
            UserId::new("userA".to_string()).unwrap(),
        )
    }

    fn usecase(
        repository: MockMessageRepository,
        broadcaster: MockMessageBroadcaster,
    ) -> SendMessageUseCase {
        SendMessageUseCase::new(
            Arc::new(repository),
            Arc::new(broadcaster),
            Arc::new(FixedClock::from_unix_secs(NOW)),
        )
    }

    #[tokio::test]
    async fn test_message_is_stamped_persisted_then_broadcast() {
        // given:
        let mut seq = Sequence::new();
        let mut repository = MockMessageRepository::new();
        repository
            .expect_append_message()
            .withf(|m| {
                m.room_id.as_str() == "42"
                    && m.sender.as_str() == "userA"
                    && m.content == "hi"
                    && m.sent_at.timestamp() == NOW
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|m| Ok(StoredMessage::record(m)));
        let mut broadcaster = MockMessageBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .withf(|m| m.content == "hi" && m.sent_at.timestamp() == NOW)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let (room_id, sender) = ids();

        // when:
        let result = usecase(repository, broadcaster)
            .execute(room_id, sender, "hi".to_string())
            .await;

        // then:
        let message = result.unwrap();
        assert_eq!(message.sent_at.timestamp(), NOW);
    }

    #[tokio::test]
    async fn test_persistence_failure_still_broadcasts() {
        // given:
        let mut repository = MockMessageRepository::new();
        repository
            .expect_append_message()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("db down".to_string())));
        let mut broadcaster = MockMessageBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .with(always())
            .times(1)
            .returning(|_| Ok(()));
        let (room_id, sender) = ids();

        // when:
        let result = usecase(repository, broadcaster)
            .execute(room_id, sender, "still here".to_string())
            .await;

        // then:
        assert_eq!(result.unwrap().content, "still here");
    }

    #[tokio::test]
    async fn test_hub_unavailable_is_reported() {
        // given:
        let mut repository = MockMessageRepository::new();
        repository
            .expect_append_message()
            .returning(|m| Ok(StoredMessage::record(m)));
        let mut broadcaster = MockMessageBroadcaster::new();
        broadcaster
            .expect_broadcast()
            .returning(|_| Err(HubError::Unavailable));
        let (room_id, sender) = ids();

        // when:
        let result = usecase(repository, broadcaster)
            .execute(room_id, sender, "hi".to_string())
            .await;

        // then:
        assert_eq!(result, Err(SendMessageError::HubUnavailable));
    }
}
