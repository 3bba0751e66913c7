//! The accept loop.
//!
//! Serves connections strictly sequentially: handshake → parse → respond →
//! close, then back to listening. A stalled peer therefore blocks all
//! subsequent connections; that is the documented baseline, not an
//! oversight. No read or write timeout is enforced within an established
//! connection.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::config::ServerConfig;
use crate::http::handler;
use crate::net::listener::{Listener, ListenerError};
use crate::net::tls::TlsContext;

/// The payload server: one accept loop, one connection at a time.
pub struct Server {
    config: ServerConfig,
    tls: TlsContext,
}

impl Server {
    /// Create a server from a validated configuration and a built TLS context.
    pub fn new(config: ServerConfig, tls: TlsContext) -> Self {
        Self { config, tls }
    }

    /// Run the accept loop until the shutdown signal is observed.
    ///
    /// Accept calls are bounded by the poll interval; an elapsed accept is
    /// the sole point where shutdown is checked, and is never logged as an
    /// error. TLS handshake failures and request errors are
    /// connection-scoped: logged, dropped, loop continues. A failed TCP
    /// accept is fatal and propagates.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Result<(), ListenerError> {
        let poll_interval = Duration::from_secs(self.config.listener.accept_poll_secs);
        let root = PathBuf::from(&self.config.content.root_dir);

        loop {
            let (tcp, peer_addr) = match time::timeout(poll_interval, listener.accept()).await {
                Err(_elapsed) => {
                    if *shutdown_rx.borrow_and_update() {
                        tracing::info!("Shutdown signal observed, closing listener");
                        break;
                    }
                    continue;
                }
                Ok(Err(e)) => return Err(e),
                Ok(Ok(conn)) => conn,
            };

            tracing::info!(peer_addr = %peer_addr, "Connection accepted");

            let mut tls_stream = match self.tls.accept(tcp).await {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(peer_addr = %peer_addr, error = %e, "TLS handshake failed");
                    continue;
                }
            };

            // Sequential by contract: the next accept waits for this
            // connection to finish.
            if let Err(e) = handler::serve_connection(&mut tls_stream, &root).await {
                tracing::error!(peer_addr = %peer_addr, error = %e, "Error handling request");
            }
        }

        // Listener drops here, releasing the socket on every exit path.
        Ok(())
    }
}
