//! Utilities shared by the Sparks server and client.

pub mod logger;
pub mod time;
