//! Inform: bare list of option codes the sender supports or requests
//!
//! Layout: `[header:4][code:1]*`. No lengths, no values.

use super::expect_header;
use crate::constants::HEADER_LEN;
use crate::protocol::error::Result;
use crate::protocol::header::Header;
use crate::protocol::types::{MessageType, OptionCode};
use bytes::BufMut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformMessage {
    pub(super) header: Header,
    options: Vec<OptionCode>,
}

impl InformMessage {
    pub fn new() -> Self {
        Self::with_header(Header::new(MessageType::Inform))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            options: Vec::new(),
        }
    }

    /// All codes in order, including unrecognized ones
    pub fn options(&self) -> &[OptionCode] {
        &self.options
    }

    /// Append one code
    pub fn set_option(&mut self, code: OptionCode) {
        self.options.push(code);
    }

    /// Replace the whole list
    pub fn set_options(&mut self, codes: impl IntoIterator<Item = OptionCode>) {
        self.options.clear();
        self.options.extend(codes);
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.options.len()
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        self.header.encode_into(out);
        for &code in &self.options {
            out.put_u8(code.into());
        }
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        let header = expect_header(buf, MessageType::Inform)?;
        let options = buf[HEADER_LEN..]
            .iter()
            .copied()
            .map(OptionCode::from)
            .collect();
        Ok(Self { header, options })
    }
}

impl Default for InformMessage {
    fn default() -> Self {
        Self::new()
    }
}
