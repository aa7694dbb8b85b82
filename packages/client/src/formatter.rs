//! Message formatting utilities for client display.

use sparks_server::infrastructure::dto::websocket::OutboundMessage;
use sparks_shared::time::parse_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message as `[HH:MM:SS] sender: content`.
    ///
    /// Messages from `current_user` are marked with `(me)`. A time the server
    /// sent in an unexpected shape is shown verbatim.
    pub fn format_chat_message(message: &OutboundMessage, current_user: &str) -> String {
        let time = parse_rfc3339(&message.time)
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|_| message.time.clone());
        let me_suffix = if message.sender == current_user {
            " (me)"
        } else {
            ""
        };
        format!(
            "\n[{}] {}{}: {}\n",
            time, message.sender, me_suffix, message.content
        )
    }

    /// Format a message that could not be parsed
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }

    /// Format the banner shown after connecting
    pub fn format_connected(user_id: &str, room_id: &str) -> String {
        format!(
            "\nYou are '{}' in room '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
            user_id, room_id
        )
    }
}
