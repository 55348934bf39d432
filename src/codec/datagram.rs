//! Datagram codec
//!
//! One datagram carries exactly one message:
//! - decode: validates the datagram with a configured `Decoder`
//! - encode: appends the message's wire form
//!
//! Empty datagrams produce no frame.

use super::{Codec, Frame};
use crate::protocol::{Decoder, Message};

#[derive(Debug, Clone, Default)]
pub struct DatagramCodec {
    decoder: Decoder,
}

impl DatagramCodec {
    pub fn new(decoder: Decoder) -> Self {
        Self { decoder }
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }
}

impl Codec for DatagramCodec {
    fn decode(&mut self, data: &[u8], mut on_frame: impl FnMut(Frame)) {
        if data.is_empty() {
            return;
        }
        let frame = match self.decoder.parse(data) {
            Ok(message) => Frame::Message(message),
            Err(error) => Frame::Rejected {
                error,
                len: data.len(),
            },
        };
        on_frame(frame);
    }

    fn encode(&self, message: &Message, output: &mut Vec<u8>) {
        output.reserve(message.encoded_len());
        message.encode_into(output);
    }
}
