//! NAK: negative acknowledgment with a one-byte reason

use super::{check_trailing, expect_header};
use crate::constants::{NAK_CODE_OFFSET, NAK_MESSAGE_LEN};
use crate::protocol::decoder::TrailingBytes;
use crate::protocol::error::Result;
use crate::protocol::header::{ensure_len, Header};
use crate::protocol::types::{MessageType, NakCode};
use bytes::BufMut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NakMessage {
    pub(super) header: Header,
    response_code: NakCode,
}

impl NakMessage {
    /// NAK with `GeneralError`
    pub fn new() -> Self {
        Self::with_header(Header::new(MessageType::Nak))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            response_code: NakCode::GeneralError,
        }
    }

    pub fn response_code(&self) -> NakCode {
        self.response_code
    }

    pub fn set_response_code(&mut self, code: NakCode) {
        self.response_code = code;
    }

    pub fn encoded_len(&self) -> usize {
        NAK_MESSAGE_LEN
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        self.header.encode_into(out);
        out.put_u8(self.response_code.into());
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with(buf, TrailingBytes::Ignore)
    }

    pub fn decode_with(buf: &[u8], policy: TrailingBytes) -> Result<Self> {
        let header = expect_header(buf, MessageType::Nak)?;
        ensure_len(buf, NAK_MESSAGE_LEN)?;
        check_trailing(buf, NAK_MESSAGE_LEN, policy)?;

        let response_code = NakCode::from(buf[NAK_CODE_OFFSET]);
        Ok(Self {
            header,
            response_code,
        })
    }
}

impl Default for NakMessage {
    fn default() -> Self {
        Self::new()
    }
}
