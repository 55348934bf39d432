//! Settings: controller pushes configuration as option records
//!
//! Layout: `[header:4]([code:1][len:u32 LE][value:len])*`

use super::expect_header;
use crate::constants::HEADER_LEN;
use crate::protocol::error::Result;
use crate::protocol::header::Header;
use crate::protocol::options::{decode_options, OptionEntry};
use crate::protocol::types::{MessageType, OptionCode};
use bytes::BufMut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsMessage {
    pub(super) header: Header,
    options: Vec<OptionEntry>,
}

impl SettingsMessage {
    pub fn new() -> Self {
        Self::with_header(Header::new(MessageType::Settings))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            options: Vec::new(),
        }
    }

    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    /// First option carrying `code`, if any
    pub fn option(&self, code: OptionCode) -> Option<&OptionEntry> {
        self.options.iter().find(|o| o.code == code)
    }

    /// Append an option. Values longer than `u32::MAX` are rejected.
    pub fn add_option(&mut self, option: OptionEntry) -> Result<()> {
        option.check_len()?;
        self.options.push(option);
        Ok(())
    }

    /// Drop every option, leaving a header-only message
    pub fn strip_options(&mut self) {
        self.options.clear();
    }

    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.options.iter().map(OptionEntry::encoded_len).sum::<usize>()
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        self.header.encode_into(out);
        for option in &self.options {
            option.encode_into(out);
        }
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        let header = expect_header(buf, MessageType::Settings)?;
        let options = decode_options(&buf[HEADER_LEN..], HEADER_LEN)?;
        Ok(Self { header, options })
    }
}

impl Default for SettingsMessage {
    fn default() -> Self {
        Self::new()
    }
}
