//! UseCase: read a room's message history.

use std::sync::Arc;

use crate::domain::{MessageRepository, RoomId, StoredMessage};

use super::error::GetHistoryError;

/// ルーム履歴取得のユースケース
pub struct GetHistoryUseCase {
    repository: Arc<dyn MessageRepository>,
}

impl GetHistoryUseCase {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    /// History of `room_id`, oldest first
    pub async fn execute(&self, room_id: &RoomId) -> Result<Vec<StoredMessage>, GetHistoryError> {
        self.repository
            .get_history(room_id)
            .await
            .map_err(|e| GetHistoryError::Repository(e.to_string()))
    }
}
