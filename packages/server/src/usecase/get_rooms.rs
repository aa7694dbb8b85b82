//! UseCase: list live rooms.

use std::sync::Arc;

use crate::domain::{RoomDirectory, RoomSummary};

use super::error::GetRoomsError;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    directory: Arc<dyn RoomDirectory>,
}

impl GetRoomsUseCase {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self) -> Result<Vec<RoomSummary>, GetRoomsError> {
        self.directory
            .rooms()
            .await
            .map_err(|_| GetRoomsError::HubUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HubError, MockRoomDirectory, RoomId};

    #[tokio::test]
    async fn test_returns_directory_snapshot() {
        // given:
        let mut directory = MockRoomDirectory::new();
        directory.expect_rooms().returning(|| {
            Ok(vec![RoomSummary {
                room_id: RoomId::new("42".to_string()).unwrap(),
                members: 2,
            }])
        });
        let usecase = GetRoomsUseCase::new(Arc::new(directory));

        // when:
        let rooms = usecase.execute().await.unwrap();

        // then:
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].members, 2);
    }

    #[tokio::test]
    async fn test_hub_unavailable_is_mapped() {
        // given:
        let mut directory = MockRoomDirectory::new();
        directory
            .expect_rooms()
            .returning(|| Err(HubError::Unavailable));
        let usecase = GetRoomsUseCase::new(Arc::new(directory));

        // when / then:
        assert_eq!(usecase.execute().await, Err(GetRoomsError::HubUnavailable));
    }
}
