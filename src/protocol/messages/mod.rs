//! Per-variant message layouts
//!
//! Each variant owns its fields and provides `encode_into` plus a `decode`
//! that checks the type tag and its own fixed region before touching any
//! variable-length section.
//!
//! Instances are plain owned values. Mutating one from several threads
//! needs external synchronization; separate instances share nothing.

/// Header access for variant structs
///
/// The type tag is fixed by the variant, so only version and cookie are
/// writable from outside the crate.
macro_rules! impl_header_access {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn header(&self) -> &Header {
                    &self.header
                }

                pub(crate) fn header_mut(&mut self) -> &mut Header {
                    &mut self.header
                }

                pub fn set_version(&mut self, version: u8) {
                    self.header.set_version(version);
                }

                /// See [`Header::set_cookie`]
                pub fn set_cookie(&mut self, cookie: &[u8]) -> Result<()> {
                    self.header.set_cookie(cookie)
                }
            }
        )*
    };
}

mod data;
mod inform;
mod job;
mod nak;
mod register;
mod settings;

pub use data::DataMessage;
pub use inform::InformMessage;
pub use job::JobMessage;
pub use nak::NakMessage;
pub use register::RegisterMessage;
pub use settings::SettingsMessage;

use super::decoder::TrailingBytes;
use super::error::{ProtocolError, Result};
use super::header::{ensure_len, Header};
use super::types::MessageType;

impl_header_access!(
    DataMessage,
    InformMessage,
    JobMessage,
    NakMessage,
    RegisterMessage,
    SettingsMessage,
);

/// Decode the header and require it to carry `expected`
pub(crate) fn expect_header(buf: &[u8], expected: MessageType) -> Result<Header> {
    let header = Header::decode(buf)?;
    if header.message_type() != expected {
        return Err(ProtocolError::TypeMismatch {
            expected,
            actual: header.message_type(),
        });
    }
    Ok(header)
}

/// Apply the trailing-bytes policy to a layout of known total size
pub(crate) fn check_trailing(buf: &[u8], expected: usize, policy: TrailingBytes) -> Result<()> {
    if policy == TrailingBytes::Reject && buf.len() > expected {
        return Err(ProtocolError::TrailingBytes {
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

/// Decode a header-only message (Null, Disconnect, Version, ACK)
pub(crate) fn decode_bare(
    buf: &[u8],
    expected: MessageType,
    policy: TrailingBytes,
) -> Result<Header> {
    let header = expect_header(buf, expected)?;
    check_trailing(buf, crate::constants::HEADER_LEN, policy)?;
    Ok(header)
}

/// Read a fixed-size byte array at `offset`
pub(crate) fn read_array<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    ensure_len(buf, offset + N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    Ok(out)
}
