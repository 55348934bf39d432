//! Codec abstraction for message encoding/decoding
//!
//! Separates encoding concerns from transport:
//! - **Codec**: How datagrams become messages (validation policy included)
//! - **Transport**: How bytes flow (UDP)

pub mod datagram;

pub use datagram::DatagramCodec;

use crate::protocol::{Message, ProtocolError};

/// Decoded frame from a codec
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Well-formed protocol message
    Message(Message),
    /// Datagram that failed validation
    Rejected {
        /// Why it was rejected
        error: ProtocolError,
        /// Size of the rejected datagram
        len: usize,
    },
}

/// Codec trait for encoding/decoding messages
///
/// A codec transforms raw bytes into frames (decode) and messages into
/// bytes for transmission (encode).
pub trait Codec: Send {
    /// Decode incoming bytes
    ///
    /// Calls `on_frame` for each frame detected.
    fn decode(&mut self, data: &[u8], on_frame: impl FnMut(Frame));

    /// Encode a message for transmission
    ///
    /// Appends encoded bytes to `output`.
    fn encode(&self, message: &Message, output: &mut Vec<u8>);
}
