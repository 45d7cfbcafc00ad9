//! Error type for the webhook listener.

use std::net::SocketAddr;

use thiserror::Error;

/// Failures starting or running the webhook server.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listen address could not be bound.
    #[error("Failed to bind webhook listener to {addr}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// The server terminated with an I/O error.
    #[error("Webhook listener failed")]
    Serve(#[source] std::io::Error),
}
