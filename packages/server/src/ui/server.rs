//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ConnectionConfig,
    hub::HubHandle,
    usecase::{GetHistoryUseCase, GetRoomsUseCase, SendMessageUseCase},
};

use super::{
    handler::{get_room_history, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Room chat server
///
/// # Example
///
/// ```ignore
/// let (hub, _hub_task) = Hub::spawn(DEFAULT_HUB_CAPACITY);
/// let server = Server::new(
///     hub,
///     send_message_usecase,
///     get_history_usecase,
///     get_rooms_usecase,
///     ConnectionConfig::default(),
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(
        hub: HubHandle,
        send_message_usecase: Arc<SendMessageUseCase>,
        get_history_usecase: Arc<GetHistoryUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        connection_config: ConnectionConfig,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                hub,
                send_message_usecase,
                get_history_usecase,
                get_rooms_usecase,
                connection_config,
            }),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{user_id}/room/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}/messages", get(get_room_history))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Sparks chat server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws/{{user_id}}/room/{{room_id}}", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
