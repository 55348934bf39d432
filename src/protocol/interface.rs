//! Interface records carried by Register messages
//!
//! Each record is 11 bytes: `[type:1][mac:6][ipv4:4]`.

use super::types::NetType;
use crate::constants::{HARDWARE_ADDR_LEN, INTERFACE_RECORD_LEN};
use bytes::BufMut;
use std::fmt;
use std::net::Ipv4Addr;

/// Six-byte hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MacAddr(pub [u8; HARDWARE_ADDR_LEN]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetInterface {
    pub kind: NetType,
    pub hardware_address: MacAddr,
    pub ipv4_address: Ipv4Addr,
}

impl NetInterface {
    pub fn new(kind: NetType, hardware_address: [u8; 6], ipv4_address: Ipv4Addr) -> Self {
        Self {
            kind,
            hardware_address: MacAddr(hardware_address),
            ipv4_address,
        }
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        out.put_u8(self.kind.into());
        out.put_slice(&self.hardware_address.0);
        out.put_slice(&self.ipv4_address.octets());
    }

    /// Parse one record. `record` must be exactly `INTERFACE_RECORD_LEN` bytes.
    pub(crate) fn decode(record: &[u8]) -> Self {
        debug_assert_eq!(record.len(), INTERFACE_RECORD_LEN);
        let kind = NetType::from(record[0]);
        let mut mac = [0u8; HARDWARE_ADDR_LEN];
        mac.copy_from_slice(&record[1..1 + HARDWARE_ADDR_LEN]);
        let ip = &record[1 + HARDWARE_ADDR_LEN..INTERFACE_RECORD_LEN];
        Self {
            kind,
            hardware_address: MacAddr(mac),
            ipv4_address: Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]),
        }
    }
}

/// Parse `count` consecutive records from `buf`.
///
/// The caller has already checked that `buf` holds `count` records.
pub(crate) fn decode_interfaces(buf: &[u8], count: usize) -> Vec<NetInterface> {
    buf.chunks_exact(INTERFACE_RECORD_LEN)
        .take(count)
        .map(NetInterface::decode)
        .collect()
}
