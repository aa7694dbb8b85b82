//! Sparks room chat client.
//!
//! Joins a room, sends every line typed on stdin and prints what the room
//! receives. Reconnects on connection loss (max 5 attempts, 5 seconds apart).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sparks-client -- --user alice --room 42
//! cargo run --bin sparks-client -- -u bob -r 42 --url ws://127.0.0.1:3000
//! ```

use clap::Parser;

use sparks_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sparks-client")]
#[command(about = "WebSocket room chat client", long_about = None)]
struct Args {
    /// User id to chat as
    #[arg(short = 'u', long)]
    user: String,

    /// Room (match) to join
    #[arg(short = 'r', long)]
    room: String,

    /// Server base URL
    #[arg(long, env = "SPARKS_URL", default_value = "ws://127.0.0.1:8080")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = sparks_client::run_client(args.url, args.user, args.room).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
