//! Transport abstraction for datagram I/O
//!
//! Separates I/O concerns from protocol logic:
//! - **Transport**: How datagrams flow (UDP)
//! - **Codec**: How datagrams become messages (handled separately)
//!
//! A transport does NOT handle:
//! - Message validation (that's the codec's job)
//! - Statistics or logging of rejected input (that's the endpoint's job)
//! - Retransmission or sessions (not part of this protocol layer)

pub mod udp;

pub use udp::UdpTransport;

use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::error::Result;

/// Datagram received from a peer
#[derive(Debug, Clone)]
pub struct Datagram {
    pub peer: SocketAddr,
    pub payload: Bytes,
}

/// Datagram queued for sending
#[derive(Debug, Clone)]
pub struct Outgoing {
    /// Destination, or `None` for the last peer that sent us data
    pub peer: Option<SocketAddr>,
    pub payload: Bytes,
}

/// Channels for bidirectional communication with a transport
///
/// The transport owns the underlying socket and communicates via these
/// channels. When the transport stops (shutdown or error), it closes them.
pub struct TransportChannels {
    /// Receive datagrams from the transport
    ///
    /// Returns `None` when the transport has stopped.
    pub rx: mpsc::Receiver<Datagram>,

    /// Send datagrams through the transport
    pub tx: mpsc::Sender<Outgoing>,

    /// Address the transport is bound to
    pub local_addr: SocketAddr,
}

/// Trait for spawnable transports
///
/// # Lifecycle
///
/// 1. Create transport with configuration
/// 2. Call `spawn()` to start I/O in background
/// 3. Use returned channels for communication
/// 4. Transport runs until `shutdown` is set or the channels are dropped
pub trait Transport: Send + 'static {
    /// Spawn the transport in background
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be initialized
    /// (e.g., bind failed).
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<TransportChannels>;
}
