//! InMemory message log.
//!
//! Implements the `MessageRepository` port with a per-room `Vec`. Contents
//! live for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRepository, RepositoryError, RoomId, StoredMessage};

/// In-memory message log keyed by room
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<HashMap<RoomId, Vec<StoredMessage>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored messages across all rooms
    pub async fn len(&self) -> usize {
        let messages = self.messages.lock().await;
        messages.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append_message(
        &self,
        message: ChatMessage,
    ) -> Result<StoredMessage, RepositoryError> {
        let stored = StoredMessage::record(message);
        let mut messages = self.messages.lock().await;
        messages
            .entry(stored.room_id.clone())
            .or_default()
            .push(stored.clone());
        tracing::debug!("Stored message {} in room '{}'", stored.id, stored.room_id);
        Ok(stored)
    }

    async fn get_history(&self, room_id: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let messages = self.messages.lock().await;
        let mut history = messages.get(room_id).cloned().unwrap_or_default();
        // stable: equal timestamps keep insertion order
        history.sort_by_key(|message| message.sent_at);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use chrono::{DateTime, Utc};

    fn message(room_id: &str, sender: &str, content: &str, secs: i64) -> ChatMessage {
        ChatMessage::new(
            RoomId::new(room_id.to_string()).unwrap(),
            UserId::new(sender.to_string()).unwrap(),
            content.to_string(),
            DateTime::<Utc>::from_timestamp(secs, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        // given:
        let repo = InMemoryMessageRepository::new();

        // when:
        let first = repo.append_message(message("42", "a", "one", 10)).await.unwrap();
        let second = repo.append_message(message("42", "a", "two", 11)).await.unwrap();

        // then:
        assert_ne!(first.id, second.id);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_room() {
        // given:
        let repo = InMemoryMessageRepository::new();
        repo.append_message(message("1", "a", "room one", 10)).await.unwrap();
        repo.append_message(message("2", "b", "room two", 11)).await.unwrap();

        // when:
        let history = repo
            .get_history(&RoomId::new("1".to_string()).unwrap())
            .await
            .unwrap();

        // then:
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "room one");
    }

    #[tokio::test]
    async fn test_history_is_ordered_by_time_then_insertion() {
        // given: appended out of time order, with a tie at t=20
        let repo = InMemoryMessageRepository::new();
        repo.append_message(message("42", "a", "late", 30)).await.unwrap();
        repo.append_message(message("42", "b", "tie first", 20)).await.unwrap();
        repo.append_message(message("42", "a", "tie second", 20)).await.unwrap();
        repo.append_message(message("42", "b", "early", 10)).await.unwrap();

        // when:
        let history = repo
            .get_history(&RoomId::new("42".to_string()).unwrap())
            .await
            .unwrap();

        // then:
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["early", "tie first", "tie second", "late"]);
    }

    #[tokio::test]
    async fn test_history_of_unknown_room_is_empty() {
        // given:
        let repo = InMemoryMessageRepository::new();

        // when:
        let history = repo
            .get_history(&RoomId::new("nobody".to_string()).unwrap())
            .await
            .unwrap();

        // then:
        assert!(history.is_empty());
        assert!(repo.is_empty().await);
    }
}
