//! echod: a TCP echo server
//!
//! Accepts one connection at a time and writes every byte it receives
//! back to the peer unmodified, until the peer closes the connection.
//!
//! Features:
//! - Raw byte echo, no framing
//! - Connection errors are logged and do not stop the server
//! - Configuration via CLI arguments or TOML file

mod config;
mod server;

use config::Config;
use server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(address = %config.listen, "Starting echod server");

    // One connection is served at a time, so a current-thread runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;

    let server = Server::new(config);
    runtime.block_on(server.run())?;

    Ok(())
}
