//! Interactive command-line client for Sparks room chat.

mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use formatter::MessageFormatter;
pub use runner::run_client;
pub use session::room_url;
