//! Connection hub: room registry and the coordinator that owns it.
//!
//! All membership changes and fan-out decisions go through a single
//! coordinator task. Connections never touch the registry; they hold a
//! [`HubHandle`] and send it intents.

mod command;
mod coordinator;
mod handle;
mod registry;

pub use command::HubCommand;
pub use coordinator::Hub;
pub use handle::{ConnectionHandle, HubHandle, Mailbox, MailboxReceiver, mailbox};
pub use registry::{BroadcastOutcome, RoomRegistry};
