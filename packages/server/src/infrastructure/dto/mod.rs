//! Data Transfer Objects (DTOs) for the chat server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: frames exchanged on the room socket
//! - `http`: HTTP API response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
