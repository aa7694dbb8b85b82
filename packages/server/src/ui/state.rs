//! Server state shared by the handlers.

use std::sync::Arc;

use crate::{
    config::ConnectionConfig,
    hub::HubHandle,
    usecase::{GetHistoryUseCase, GetRoomsUseCase, SendMessageUseCase},
};

/// Shared application state
pub struct AppState {
    /// Front door of the hub coordinator
    pub hub: HubHandle,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// Settings applied to every accepted connection
    pub connection_config: ConnectionConfig,
}
