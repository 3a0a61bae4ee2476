//! Chat room relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chitchat-server -- --port 8900
//! ```

use chitchat_server::config::{ServerArgs, ServerConfig};
use chitchat_shared::logger::setup_logger;
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = chitchat_server::run_server(ServerConfig::from(&args)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
