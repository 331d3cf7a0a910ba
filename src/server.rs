//! TCP server that echoes bytes back to the peer.
//!
//! Accepts one connection at a time, reads fixed-size chunks, and writes
//! the same bytes back until the peer closes the connection.

use crate::config::Config;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, trace, warn};

/// Read chunk size
const CHUNK_SIZE: usize = 1024;

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Server { config }
    }

    /// Bind the configured address and begin accepting connections
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.config.listen).await?;
        info!(address = %self.config.listen, "Server listening");

        self.serve(listener).await
    }

    /// Accept connections from the listener, one at a time.
    ///
    /// The next accept does not start until the current peer disconnects.
    /// Errors on a connection finish that connection only; errors from
    /// accept itself are logged and the loop continues.
    async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    debug!(peer = %addr, "New connection");

                    match handle_connection(stream).await {
                        Ok(bytes) => debug!(peer = %addr, bytes, "Connection closed"),
                        Err(e) => warn!(peer = %addr, error = %e, "Connection error"),
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}

/// Handle a single client connection.
///
/// Reads up to `CHUNK_SIZE` bytes at a time and writes each non-empty
/// chunk back unmodified. Returns the total number of bytes echoed once
/// the peer closes its write side.
async fn handle_connection(mut stream: TcpStream) -> std::io::Result<u64> {
    let mut buffer = BytesMut::with_capacity(CHUNK_SIZE);
    let mut echoed: u64 = 0;

    loop {
        buffer.clear();

        let n = stream.read_buf(&mut buffer).await?;
        if n == 0 {
            // Peer half-closed
            trace!("Connection closed by peer");
            return Ok(echoed);
        }

        stream.write_all(&buffer).await?;
        echoed += n as u64;
        trace!(bytes = n, "Echoed chunk");
    }
}
