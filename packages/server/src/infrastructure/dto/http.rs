//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One entry of a room's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessageDto {
    pub id: String,
    pub room_id: String,
    pub sender: String,
    pub content: String,
    pub sent_at: String,
}

/// Live room with its member count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room_id: String,
    pub members: usize,
}
