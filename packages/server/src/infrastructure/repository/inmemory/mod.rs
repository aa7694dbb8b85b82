//! In-memory storage backends.

mod message;

pub use message::InMemoryMessageRepository;
