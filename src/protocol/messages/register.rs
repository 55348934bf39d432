//! Register: an agent announces its client id and network interfaces
//!
//! Layout: `[header:4][client_id:16][count:1][interface:11 × count]`

use super::{check_trailing, expect_header, read_array};
use crate::constants::{
    CLIENT_ID_LEN, CLIENT_ID_OFFSET, INTERFACE_COUNT_OFFSET, INTERFACE_RECORD_LEN,
    MAX_INTERFACES, REGISTER_PREFIX_LEN,
};
use crate::protocol::decoder::TrailingBytes;
use crate::protocol::error::{ProtocolError, Result};
use crate::protocol::header::{ensure_len, Header};
use crate::protocol::interface::{decode_interfaces, NetInterface};
use crate::protocol::types::MessageType;
use bytes::BufMut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterMessage {
    pub(super) header: Header,
    client_id: [u8; CLIENT_ID_LEN],
    interfaces: Vec<NetInterface>,
}

impl RegisterMessage {
    /// Zeroed client id, no interfaces
    pub fn new() -> Self {
        Self::with_header(Header::new(MessageType::Register))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            client_id: [0; CLIENT_ID_LEN],
            interfaces: Vec::new(),
        }
    }

    pub fn client_id(&self) -> &[u8; CLIENT_ID_LEN] {
        &self.client_id
    }

    pub fn set_client_id(&mut self, id: [u8; CLIENT_ID_LEN]) {
        self.client_id = id;
    }

    /// Number of interfaces, as written to the count byte
    pub fn interface_count(&self) -> u8 {
        // add_interface caps the list at u8::MAX
        self.interfaces.len() as u8
    }

    pub fn interfaces(&self) -> &[NetInterface] {
        &self.interfaces
    }

    pub fn add_interface(&mut self, iface: NetInterface) -> Result<()> {
        if self.interfaces.len() >= MAX_INTERFACES {
            return Err(ProtocolError::TooManyInterfaces);
        }
        self.interfaces.push(iface);
        Ok(())
    }

    pub fn encoded_len(&self) -> usize {
        REGISTER_PREFIX_LEN + INTERFACE_RECORD_LEN * self.interfaces.len()
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        self.header.encode_into(out);
        out.put_slice(&self.client_id);
        out.put_u8(self.interface_count());
        for iface in &self.interfaces {
            iface.encode_into(out);
        }
    }

    /// Decode, ignoring bytes past the last declared interface
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with(buf, TrailingBytes::Ignore)
    }

    pub fn decode_with(buf: &[u8], policy: TrailingBytes) -> Result<Self> {
        let header = expect_header(buf, MessageType::Register)?;
        ensure_len(buf, REGISTER_PREFIX_LEN)?;

        let client_id = read_array::<CLIENT_ID_LEN>(buf, CLIENT_ID_OFFSET)?;
        let count = buf[INTERFACE_COUNT_OFFSET] as usize;
        let total = REGISTER_PREFIX_LEN + INTERFACE_RECORD_LEN * count;
        ensure_len(buf, total)?;
        check_trailing(buf, total, policy)?;

        let interfaces = decode_interfaces(&buf[REGISTER_PREFIX_LEN..total], count);
        Ok(Self {
            header,
            client_id,
            interfaces,
        })
    }
}

impl Default for RegisterMessage {
    fn default() -> Self {
        Self::new()
    }
}
