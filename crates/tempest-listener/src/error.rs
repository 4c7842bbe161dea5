//! Error types for the packet listener.

use std::io;

/// Errors that stop the listener from starting.
///
/// Nothing that happens to an individual datagram is represented here;
/// those failures are handled inside the receive loop.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The UDP socket could not be bound.
    #[error("failed to bind UDP listener on {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The bound socket could not report its address.
    #[error("failed to read listener address: {0}")]
    LocalAddr(#[source] io::Error),
}
