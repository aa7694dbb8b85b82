//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use sparks_server::infrastructure::dto::websocket::{InboundMessage, OutboundMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Build the room socket URL from the server base URL
pub fn room_url(base_url: &str, user_id: &str, room_id: &str) -> String {
    format!(
        "{}/ws/{}/room/{}",
        base_url.trim_end_matches('/'),
        user_id,
        room_id
    )
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user ends the session, an error when the
/// connection fails or is lost.
pub async fn run_client_session(
    base_url: &str,
    user_id: &str,
    room_id: &str,
) -> Result<(), ClientError> {
    let url = room_url(base_url, user_id, room_id);

    let (ws_stream, _response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) => {
            return Err(ClientError::Rejected(response.status().to_string()));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to {}", url);
    println!("{}", MessageFormatter::format_connected(user_id, room_id));

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let user_for_read = user_id.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundMessage>(text.as_str()) {
                        Ok(chat) => MessageFormatter::format_chat_message(&chat, &user_for_read),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&user_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return true;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return true;
                }
                // pings are answered by tungstenite
                _ => {}
            }
        }
        true
    });

    // Spawn a blocking thread for rustyline (synchronous readline)
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", user_id);
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to send stdin lines to the room
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let frame = InboundMessage {
                content: line,
                file: None,
            };
            let json = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::text(json)).await {
                tracing::warn!("Failed to send message: {}", e);
                return true;
            }
        }
        // input closed by the user
        let _ = write.send(Message::Close(None)).await;
        false
    });

    // If any one of the tasks completes, abort the other
    let connection_lost = tokio::select! {
        result = &mut read_task => {
            write_task.abort();
            result.unwrap_or(true)
        }
        result = &mut write_task => {
            read_task.abort();
            result.unwrap_or(true)
        }
    };

    if connection_lost {
        return Err(ClientError::ConnectionError("Connection lost".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_url_joins_segments() {
        assert_eq!(
            room_url("ws://127.0.0.1:8080", "alice", "42"),
            "ws://127.0.0.1:8080/ws/alice/room/42"
        );
    }

    #[test]
    fn test_room_url_tolerates_trailing_slash() {
        assert_eq!(
            room_url("ws://chat.example/", "bob", "7"),
            "ws://chat.example/ws/bob/room/7"
        );
    }
}
