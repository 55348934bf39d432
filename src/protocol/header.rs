//! Common 4-byte header
//!
//! Layout: `[version:1][cookie:2][type:1]`
//!
//! The cookie is not validated here. Receivers check it with
//! [`Header::verify_cookie`] (or through a configured `Decoder`).

use super::error::{ProtocolError, Result};
use super::types::MessageType;
use crate::constants::{
    COOKIE_LEN, COOKIE_OFFSET, HEADER_LEN, MAGIC_COOKIE, PROTOCOL_VERSION, TYPE_OFFSET,
    VERSION_OFFSET,
};
use bytes::BufMut;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    version: u8,
    cookie: [u8; 2],
    message_type: MessageType,
}

impl Header {
    /// Version 0, default cookie, given type
    pub fn new(message_type: MessageType) -> Self {
        Self::with_cookie(message_type, MAGIC_COOKIE)
    }

    /// Version 0 with a configured cookie
    pub fn with_cookie(message_type: MessageType, cookie: [u8; 2]) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            cookie,
            message_type,
        }
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub fn cookie(&self) -> [u8; 2] {
        self.cookie
    }

    #[inline]
    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn set_version(&mut self, version: u8) {
        self.version = version;
    }

    /// Replace the cookie. Anything other than exactly two bytes is rejected.
    pub fn set_cookie(&mut self, cookie: &[u8]) -> Result<()> {
        self.cookie = cookie
            .try_into()
            .map_err(|_| ProtocolError::CookieLength { len: cookie.len() })?;
        Ok(())
    }

    pub fn set_message_type(&mut self, message_type: MessageType) {
        self.message_type = message_type;
    }

    /// Receiver-side check against the expected magic value
    pub fn verify_cookie(&self, expected: [u8; 2]) -> Result<()> {
        if self.cookie != expected {
            return Err(ProtocolError::BadCookie {
                expected,
                actual: self.cookie,
            });
        }
        Ok(())
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        out.put_u8(self.version);
        out.put_slice(&self.cookie);
        out.put_u8(self.message_type as u8);
    }

    /// Read the header from the first 4 bytes of `buf`
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let message_type = peek_message_type(buf)?;
        let mut cookie = [0u8; COOKIE_LEN];
        cookie.copy_from_slice(&buf[COOKIE_OFFSET..COOKIE_OFFSET + COOKIE_LEN]);
        Ok(Self {
            version: buf[VERSION_OFFSET],
            cookie,
            message_type,
        })
    }
}

/// Read only the type tag, without looking at the rest of the buffer
pub fn peek_message_type(buf: &[u8]) -> Result<MessageType> {
    ensure_len(buf, HEADER_LEN)?;
    MessageType::try_from(buf[TYPE_OFFSET])
}

/// Fail with `TooShort` unless `buf` holds at least `needed` bytes
#[inline]
pub(crate) fn ensure_len(buf: &[u8], needed: usize) -> Result<()> {
    if buf.len() < needed {
        return Err(ProtocolError::TooShort {
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}
