//! Conversion logic between DTOs and domain entities.

use sparks_shared::time::to_rfc3339;

use crate::domain::{ChatMessage, RoomSummary, StoredMessage};
use crate::infrastructure::dto::{
    http::{HistoryMessageDto, RoomSummaryDto},
    websocket::OutboundMessage,
};

impl From<&ChatMessage> for OutboundMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            room_id: message.room_id.as_str().to_string(),
            sender: message.sender.as_str().to_string(),
            content: message.content.clone(),
            time: to_rfc3339(&message.sent_at),
        }
    }
}

impl From<StoredMessage> for HistoryMessageDto {
    fn from(message: StoredMessage) -> Self {
        Self {
            id: message.id.to_string(),
            room_id: message.room_id.into_string(),
            sender: message.sender.into_string(),
            content: message.content,
            sent_at: to_rfc3339(&message.sent_at),
        }
    }
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            room_id: summary.room_id.into_string(),
            members: summary.members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomId, UserId};
    use chrono::{DateTime, Utc};

    fn chat_message() -> ChatMessage {
        ChatMessage::new(
            RoomId::new("42".to_string()).unwrap(),
            UserId::new("userA".to_string()).unwrap(),
            "hi".to_string(),
            DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap(),
        )
    }

    #[test]
    fn test_chat_message_to_outbound() {
        // when:
        let dto = OutboundMessage::from(&chat_message());

        // then:
        assert_eq!(dto.room_id, "42");
        assert_eq!(dto.sender, "userA");
        assert_eq!(dto.content, "hi");
        assert_eq!(dto.time, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_stored_message_to_history_dto() {
        // given:
        let stored = StoredMessage::record(chat_message());
        let id = stored.id.to_string();

        // when:
        let dto: HistoryMessageDto = stored.into();

        // then:
        assert_eq!(dto.id, id);
        assert_eq!(dto.room_id, "42");
        assert_eq!(dto.sender, "userA");
        assert_eq!(dto.sent_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_room_summary_to_dto() {
        // given:
        let summary = RoomSummary {
            room_id: RoomId::new("7".to_string()).unwrap(),
            members: 3,
        };

        // when:
        let dto: RoomSummaryDto = summary.into();

        // then:
        assert_eq!(dto.room_id, "7");
        assert_eq!(dto.members, 3);
    }
}
