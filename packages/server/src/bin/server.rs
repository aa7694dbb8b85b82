//! Sparks room chat server.
//!
//! Accepts WebSocket connections on `/ws/{user_id}/room/{room_id}` and fans
//! every message out to the members of its room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sparks-server
//! cargo run --bin sparks-server -- --host 0.0.0.0 --port 3000
//! SPARKS_MAILBOX_CAPACITY=64 cargo run --bin sparks-server
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use sparks_server::{
    config::{
        ConnectionConfig, DEFAULT_HUB_CAPACITY, DEFAULT_MAILBOX_CAPACITY, DEFAULT_PONG_WAIT,
        DEFAULT_WRITE_WAIT, hub_capacity,
    },
    hub::Hub,
    infrastructure::repository::InMemoryMessageRepository,
    ui::Server,
    usecase::{GetHistoryUseCase, GetRoomsUseCase, SendMessageUseCase},
};
use sparks_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sparks-server")]
#[command(about = "WebSocket room chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "SPARKS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "SPARKS_PORT", default_value_t = 8080)]
    port: u16,

    /// Seconds of peer silence before a connection is dropped
    #[arg(long, env = "SPARKS_PONG_WAIT_SECS", default_value_t = DEFAULT_PONG_WAIT.as_secs())]
    pong_wait_secs: u64,

    /// Seconds allowed for a single frame write
    #[arg(long, env = "SPARKS_WRITE_WAIT_SECS", default_value_t = DEFAULT_WRITE_WAIT.as_secs())]
    write_wait_secs: u64,

    /// Outbound messages queued per connection before it is evicted
    #[arg(long, env = "SPARKS_MAILBOX_CAPACITY", default_value_t = DEFAULT_MAILBOX_CAPACITY)]
    mailbox_capacity: usize,

    /// Pending hub intents before senders wait
    #[arg(long, env = "SPARKS_HUB_CAPACITY", default_value_t = DEFAULT_HUB_CAPACITY)]
    hub_capacity: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let connection_config = ConnectionConfig::new(
        Duration::from_secs(args.pong_wait_secs),
        Duration::from_secs(args.write_wait_secs),
        args.mailbox_capacity,
    )?;
    let hub_capacity = hub_capacity(args.hub_capacity)?;

    // 1. Message log
    let repository = Arc::new(InMemoryMessageRepository::new());

    // 2. Hub coordinator
    let (hub, hub_task) = Hub::spawn(hub_capacity);

    // 3. UseCases
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        Arc::new(hub.clone()),
        Arc::new(SystemClock),
    ));
    let get_history_usecase = Arc::new(GetHistoryUseCase::new(repository));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(Arc::new(hub.clone())));

    // 4. Server
    let server = Server::new(
        hub,
        send_message_usecase,
        get_history_usecase,
        get_rooms_usecase,
        connection_config,
    );
    server.run(args.host, args.port).await?;

    // connections still open keep their hub handles alive
    hub_task.abort();

    Ok(())
}
