//! HTTP and WebSocket surface of the chat server.

mod connection;
mod handler;
mod server;
mod signal;
pub mod state;

pub use connection::Connection;
pub use server::Server;
