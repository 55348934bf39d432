//! Data: measurement results for a job
//!
//! Layout: `[header:4][job_id:4][data_type:1][payload..]`

use super::{expect_header, read_array};
use crate::constants::{DATA_PAYLOAD_OFFSET, DATA_TYPE_OFFSET, JOB_ID_LEN, JOB_ID_OFFSET};
use crate::protocol::error::Result;
use crate::protocol::header::{ensure_len, Header};
use crate::protocol::types::{DataType, MessageType};
use bytes::{BufMut, Bytes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMessage {
    pub(super) header: Header,
    job_id: [u8; JOB_ID_LEN],
    data_type: DataType,
    data: Bytes,
}

impl DataMessage {
    /// Zeroed job id, `Ping` type, empty payload
    pub fn new() -> Self {
        Self::with_header(Header::new(MessageType::Data))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            job_id: [0; JOB_ID_LEN],
            data_type: DataType::Ping,
            data: Bytes::new(),
        }
    }

    pub fn job_id(&self) -> [u8; JOB_ID_LEN] {
        self.job_id
    }

    pub fn set_job_id(&mut self, id: [u8; JOB_ID_LEN]) {
        self.job_id = id;
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.data_type = data_type;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the payload; any previous payload is discarded
    pub fn set_data(&mut self, data: impl Into<Bytes>) {
        self.data = data.into();
    }

    pub fn encoded_len(&self) -> usize {
        DATA_PAYLOAD_OFFSET + self.data.len()
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        self.header.encode_into(out);
        out.put_slice(&self.job_id);
        out.put_u8(self.data_type.into());
        out.put_slice(&self.data);
    }

    pub fn decode(buf: &[u8]) -> Result<Self> {
        let header = expect_header(buf, MessageType::Data)?;
        ensure_len(buf, DATA_PAYLOAD_OFFSET)?;

        let job_id = read_array::<JOB_ID_LEN>(buf, JOB_ID_OFFSET)?;
        let data_type = DataType::from(buf[DATA_TYPE_OFFSET]);

        Ok(Self {
            header,
            job_id,
            data_type,
            data: Bytes::copy_from_slice(&buf[DATA_PAYLOAD_OFFSET..]),
        })
    }
}

impl Default for DataMessage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::error::ProtocolError;

    const MESSAGE: &[u8] = b"The cow jumped over the moon";

    #[test]
    fn test_new_data_message() {
        let m = DataMessage::new();
        assert_eq!(m.header().message_type(), MessageType::Data);
        assert_eq!(m.job_id(), [0; 4]);
        assert_eq!(m.data_type(), DataType::Ping);
        assert!(m.data().is_empty());
    }

    #[test]
    fn test_set_data_keeps_type() {
        let mut m = DataMessage::new();
        m.set_data_type(DataType::Iperf3);
        m.set_data(MESSAGE);

        assert_eq!(m.data(), MESSAGE);
        assert_eq!(m.data().len(), MESSAGE.len());
        assert_eq!(m.data_type(), DataType::Iperf3);
    }

    #[test]
    fn test_set_data_replaces() {
        let mut m = DataMessage::new();
        m.set_data(Bytes::from_static(b"first payload, longer"));
        m.set_data(Bytes::from_static(b"second"));
        assert_eq!(m.data(), b"second");
        assert_eq!(m.encoded_len(), 9 + 6);
    }

    #[test]
    fn test_roundtrip() {
        let mut m = DataMessage::new();
        m.set_job_id([250, 67, 39, 62]);
        m.set_data_type(DataType::Iperf2);
        m.set_data(MESSAGE);

        let mut out = Vec::new();
        m.encode_into(&mut out);
        assert_eq!(out.len(), 9 + MESSAGE.len());
        assert_eq!(out[8], u8::from(DataType::Iperf2));

        assert_eq!(DataMessage::decode(&out).unwrap(), m);
    }

    #[test]
    fn test_empty_payload_decodes() {
        let buf = [0, b'P', b'M', 5, 1, 2, 3, 4, 0];
        let m = DataMessage::decode(&buf).unwrap();
        assert!(m.data().is_empty());
        assert_eq!(m.job_id(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_type_byte() {
        let buf = [0, b'P', b'M', 5, 1, 2, 3, 4];
        assert_eq!(
            DataMessage::decode(&buf),
            Err(ProtocolError::TooShort {
                needed: 9,
                actual: 8
            })
        );
    }

    #[test]
    fn test_unknown_data_type_kept() {
        let buf = [0, b'P', b'M', 5, 1, 2, 3, 4, 9, b'x'];
        let m = DataMessage::decode(&buf).unwrap();
        assert_eq!(m.data_type(), DataType::Unknown(9));
        assert_eq!(m.data(), &b"x"[..]);

        let mut out = Vec::new();
        m.encode_into(&mut out);
        assert_eq!(out, buf);
    }
}
