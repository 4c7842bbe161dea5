//! Packet listener for the Tempest dashboard.
//!
//! The hub broadcasts one JSON object per UDP datagram. This crate
//! receives those datagrams, decodes the three tracked message kinds into
//! named structs, and writes them into the shared
//! [`ObservationStore`](tempest_core::ObservationStore).
//!
//! # Architecture
//!
//! ```text
//! UDP socket --> decode_datagram --> ObservationStore::update
//!                      |
//!                      +--> (malformed: log + discard, unknown kind: ignore)
//! ```
//!
//! Per-datagram failures never leave [`PacketListener::run`]; only a bind
//! failure at startup is reported to the caller.

pub mod decode;
pub mod error;
pub mod listener;

pub use decode::{decode_datagram, DecodeError, Decoded};
pub use error::ListenerError;
pub use listener::{PacketListener, PacketOutcome};
