//! Option records carried by Settings messages
//!
//! Wire shape per option: `[code:1][len:u32 LE][value:len]`, repeated to the
//! end of the message. The length is always read relative to the current
//! cursor, never from a fixed offset.
//!
//! Inform messages use the same `OptionCode` domain but only as a bare list
//! of code bytes; that encoding lives with `InformMessage`.

use super::error::{ProtocolError, Result};
use super::types::OptionCode;
use crate::constants::OPTION_HEADER_LEN;
use bytes::{Buf, BufMut, Bytes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub code: OptionCode,
    pub value: Bytes,
}

impl OptionEntry {
    pub fn new(code: OptionCode, value: impl Into<Bytes>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Bytes this option occupies on the wire
    pub fn encoded_len(&self) -> usize {
        OPTION_HEADER_LEN + self.value.len()
    }

    /// Reject values whose length does not fit the 32-bit length field
    pub(crate) fn check_len(&self) -> Result<()> {
        u32::try_from(self.value.len())
            .map(|_| ())
            .map_err(|_| ProtocolError::OptionTooLarge {
                len: self.value.len(),
            })
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        out.put_u8(self.code.into());
        // Length was validated when the option was added
        out.put_u32_le(self.value.len() as u32);
        out.put_slice(&self.value);
    }
}

/// Decode every option in `buf`.
///
/// `base` is the absolute offset of `buf` inside the message, used only for
/// error reporting.
pub(crate) fn decode_options(buf: &[u8], base: usize) -> Result<Vec<OptionEntry>> {
    let mut options = Vec::new();
    let mut cursor = buf;

    while cursor.has_remaining() {
        let offset = base + (buf.len() - cursor.remaining());
        if cursor.remaining() < OPTION_HEADER_LEN {
            return Err(ProtocolError::MalformedLength {
                offset,
                remaining: cursor.remaining(),
            });
        }

        let code = OptionCode::from(cursor.get_u8());
        let declared = cursor.get_u32_le() as usize;
        if cursor.remaining() < declared {
            return Err(ProtocolError::Truncated {
                offset,
                declared,
                remaining: cursor.remaining(),
            });
        }

        let value = cursor.copy_to_bytes(declared);
        options.push(OptionEntry { code, value });
    }

    Ok(options)
}
