//! Studyhall server: student records plus the room relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin studyhall-server -- --port 8080
//! ```

use studyhall_server::ServerConfig;
use studyhall_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::load();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = studyhall_server::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
