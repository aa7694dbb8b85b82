//! Real-time room chat server.
//!
//! Clients join a room over WebSocket; every message a member sends is
//! stamped, appended to the message log and fanned out to all live members
//! of the room by a single hub coordinator.

// layers
pub mod domain;
pub mod hub;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
