//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{HistoryMessageDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Live rooms with their member counts
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    match state.get_rooms_usecase.execute().await {
        Ok(rooms) => Ok(Json(rooms.into_iter().map(Into::into).collect())),
        Err(e) => {
            tracing::error!("Failed to list rooms: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Message history of a room, oldest first
pub async fn get_room_history(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<HistoryMessageDto>>, StatusCode> {
    let room_id = RoomId::try_from(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.get_history_usecase.execute(&room_id).await {
        Ok(messages) => Ok(Json(messages.into_iter().map(Into::into).collect())),
        Err(e) => {
            tracing::error!("Failed to load history of room '{}': {}", room_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
