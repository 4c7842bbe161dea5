//! The UDP receive loop.
//!
//! [`PacketListener`] owns the bound socket and a handle to the shared
//! store. [`PacketListener::run`] loops for the life of the process: every
//! datagram is decoded and either stored, ignored, or logged and dropped.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tempest_core::{ListenerStats, ObservationStore, StationConfig};
use tempest_types::ObservationKind;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::decode::{decode_datagram, DecodeError, Decoded};
use crate::error::ListenerError;

/// Pause after a socket receive error so a persistent fault cannot spin
/// the loop.
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// What happened to one datagram.
#[derive(Debug)]
pub enum PacketOutcome {
    /// The message replaced the store slot for its kind.
    Stored(ObservationKind),
    /// A valid message of an untracked kind; carries its discriminator.
    Ignored(String),
    /// The payload failed to decode.
    Rejected(DecodeError),
}

/// Receives hub broadcasts and writes decoded messages into the store.
#[derive(Debug)]
pub struct PacketListener {
    socket: UdpSocket,
    store: Arc<ObservationStore>,
    stats: Arc<ListenerStats>,
    max_packet_size: usize,
}

impl PacketListener {
    /// Bind the UDP socket described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Bind`] if the address cannot be bound.
    /// The caller should treat this as fatal.
    pub async fn bind(
        config: &StationConfig,
        store: Arc<ObservationStore>,
        stats: Arc<ListenerStats>,
    ) -> Result<Self, ListenerError> {
        let addr = format!("{}:{}", config.udp_host, config.udp_port);
        let socket = UdpSocket::bind(&addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        info!(
            addr = %addr,
            max_packet_size = config.max_packet_size,
            "listening for hub broadcasts"
        );

        Ok(Self {
            socket,
            store,
            stats,
            max_packet_size: config.max_packet_size,
        })
    }

    /// The address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::LocalAddr`] if the OS cannot report it.
    pub fn local_addr(&self) -> Result<SocketAddr, ListenerError> {
        self.socket.local_addr().map_err(ListenerError::LocalAddr)
    }

    /// Receive datagrams forever.
    ///
    /// Datagrams longer than `max_packet_size` are truncated by the OS and
    /// will normally fail to decode. Receive errors are logged and the
    /// loop continues.
    pub async fn run(self) {
        let mut buf = vec![0_u8; self.max_packet_size];
        loop {
            match self.socket.recv_from(&mut buf).await {
                Ok((len, peer)) => {
                    let payload = buf.get(..len).unwrap_or_default();
                    let outcome = self.handle_datagram(payload).await;
                    log_outcome(peer, len, &outcome);
                }
                Err(e) => {
                    warn!(error = %e, "failed to receive datagram");
                    tokio::time::sleep(RECV_ERROR_BACKOFF).await;
                }
            }
        }
    }

    /// Run the receive loop on a background Tokio task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Decode one payload and apply it to the store.
    ///
    /// Never fails: every problem is reported through the returned
    /// [`PacketOutcome`] and counted in the listener stats.
    pub async fn handle_datagram(&self, payload: &[u8]) -> PacketOutcome {
        self.stats.record_received();

        match decode_datagram(payload) {
            Ok(Decoded::Recognized(observation)) => {
                let kind = observation.kind();
                if self.store.update(kind, observation).await {
                    self.stats.record_stored();
                    PacketOutcome::Stored(kind)
                } else {
                    self.stats.record_ignored();
                    PacketOutcome::Ignored(kind.as_str().to_owned())
                }
            }
            Ok(Decoded::Unrecognized(discriminator)) => {
                self.stats.record_ignored();
                PacketOutcome::Ignored(discriminator)
            }
            Err(e) => {
                self.stats.record_rejected();
                PacketOutcome::Rejected(e)
            }
        }
    }
}

fn log_outcome(peer: SocketAddr, len: usize, outcome: &PacketOutcome) {
    match outcome {
        PacketOutcome::Stored(kind) => debug!(%peer, len, kind = %kind, "observation stored"),
        PacketOutcome::Ignored(discriminator) => {
            trace!(%peer, len, discriminator = %discriminator, "untracked message ignored");
        }
        PacketOutcome::Rejected(e) => {
            warn!(%peer, len, error = %e, "discarding undecodable datagram");
        }
    }
}
