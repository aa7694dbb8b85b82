//! Use case layer.

mod error;
mod get_history;
mod get_rooms;
mod send_message;

pub use error::{GetHistoryError, GetRoomsError, SendMessageError};
pub use get_history::GetHistoryUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use send_message::SendMessageUseCase;
