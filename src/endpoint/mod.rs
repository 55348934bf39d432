//! Endpoint: codec applied to a transport
//!
//! The endpoint handles:
//! - Decoding inbound datagrams and dropping the malformed ones
//! - Encoding outbound messages
//! - Statistics tracking
//!
//! The endpoint does NOT handle:
//! - Transport lifecycle (that's the caller's responsibility)
//! - Retransmission, sessions or authentication

pub mod stats;

pub use stats::{Stats, StatsSnapshot};

use crate::codec::{Codec, Frame};
use crate::error::{Error, Result};
use crate::protocol::Message;
use crate::transport::{Outgoing, TransportChannels};
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Message received from a peer
#[derive(Debug, Clone, PartialEq)]
pub struct Received {
    pub peer: SocketAddr,
    pub message: Message,
}

/// Protocol endpoint over a datagram transport
///
/// # Example
///
/// ```ignore
/// let channels = UdpTransport::new(addr).spawn(shutdown.clone())?;
/// let mut endpoint = Endpoint::new(channels, DatagramCodec::default());
///
/// while let Some(received) = endpoint.recv().await {
///     endpoint.send(received.peer, &Message::new(MessageType::Ack)).await?;
/// }
/// ```
pub struct Endpoint<C: Codec> {
    channels: TransportChannels,
    codec: C,
    stats: Arc<Stats>,
    encode_buf: Vec<u8>,
}

impl<C: Codec> Endpoint<C> {
    pub fn new(channels: TransportChannels, codec: C) -> Self {
        Self {
            channels,
            codec,
            stats: Arc::new(Stats::new()),
            encode_buf: Vec::new(),
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.channels.local_addr
    }

    pub fn stats(&self) -> Arc<Stats> {
        self.stats.clone()
    }

    /// Wait for the next valid message
    ///
    /// Malformed datagrams are logged, counted and skipped.
    /// Returns `None` once the transport has stopped.
    pub async fn recv(&mut self) -> Option<Received> {
        while let Some(datagram) = self.channels.rx.recv().await {
            let mut decoded = None;
            self.codec.decode(&datagram.payload, |frame| decoded = Some(frame));

            match decoded {
                Some(Frame::Message(message)) => {
                    self.stats.add_rx(datagram.payload.len());
                    debug!(
                        "{:?} from {} ({} bytes)",
                        message.message_type(),
                        datagram.peer,
                        datagram.payload.len()
                    );
                    return Some(Received {
                        peer: datagram.peer,
                        message,
                    });
                }
                Some(Frame::Rejected { error, len }) => {
                    self.stats.add_rejected();
                    warn!("Rejected {} byte datagram from {}: {}", len, datagram.peer, error);
                }
                None => {
                    debug!("Ignoring empty datagram from {}", datagram.peer);
                }
            }
        }
        None
    }

    /// Encode and queue `message` for `peer`
    pub async fn send(&mut self, peer: SocketAddr, message: &Message) -> Result<()> {
        self.send_to(Some(peer), message).await
    }

    /// Encode and queue `message` for the last peer that sent us data
    pub async fn reply(&mut self, message: &Message) -> Result<()> {
        self.send_to(None, message).await
    }

    async fn send_to(&mut self, peer: Option<SocketAddr>, message: &Message) -> Result<()> {
        self.encode_buf.clear();
        self.codec.encode(message, &mut self.encode_buf);
        let payload = Bytes::copy_from_slice(&self.encode_buf);
        let len = payload.len();

        self.channels
            .tx
            .send(Outgoing { peer, payload })
            .await
            .map_err(|_| Error::TransportClosed)?;
        self.stats.add_tx(len);
        Ok(())
    }
}
