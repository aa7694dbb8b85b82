//! WebSocket connection acceptor.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    domain::{ConnectionId, RoomId, UserId},
    hub::{ConnectionHandle, mailbox},
    ui::{connection::Connection, state::AppState},
};

/// `GET /ws/{user_id}/room/{room_id}`
///
/// Identity comes from the path and is trusted as-is; authentication happens
/// upstream of this server.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((user_id, room_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, StatusCode> {
    let user_id = UserId::try_from(user_id).map_err(|e| {
        tracing::warn!("Rejecting connection: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let room_id = RoomId::try_from(room_id).map_err(|e| {
        tracing::warn!("Rejecting connection from '{}': {}", user_id, e);
        StatusCode::BAD_REQUEST
    })?;

    Ok(ws
        .on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| accept(socket, state, user_id, room_id)))
}

/// Register the upgraded socket with the hub and run it until it ends
async fn accept(socket: WebSocket, state: Arc<AppState>, user_id: UserId, room_id: RoomId) {
    let id = ConnectionId::generate();
    let (tx, outbox) = mailbox(state.connection_config.mailbox_capacity);
    let handle = ConnectionHandle::new(id, room_id.clone(), user_id.clone(), tx);

    if let Err(e) = state.hub.register(handle).await {
        // dropping the socket closes it
        tracing::error!("Cannot register '{}' in room '{}': {}", user_id, room_id, e);
        return;
    }
    tracing::info!(
        "Client '{}' connected to room '{}' as {}",
        user_id,
        room_id,
        id
    );

    Connection::new(
        id,
        room_id,
        user_id,
        state.hub.clone(),
        state.send_message_usecase.clone(),
        state.connection_config,
    )
    .run(socket, outbox)
    .await;
}
