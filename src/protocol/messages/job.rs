//! Start and End: header plus a 4-byte job id
//!
//! Both share one layout and differ only in the type tag.

use super::{check_trailing, expect_header, read_array};
use crate::constants::{JOB_ID_LEN, JOB_ID_OFFSET, JOB_MESSAGE_LEN};
use crate::protocol::decoder::TrailingBytes;
use crate::protocol::error::{ProtocolError, Result};
use crate::protocol::header::{peek_message_type, Header};
use crate::protocol::types::MessageType;
use bytes::BufMut;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMessage {
    pub(super) header: Header,
    job_id: [u8; JOB_ID_LEN],
}

impl JobMessage {
    /// Start message with a zeroed job id
    pub fn start() -> Self {
        Self::with_header(Header::new(MessageType::Start))
    }

    /// End message with a zeroed job id
    pub fn end() -> Self {
        Self::with_header(Header::new(MessageType::End))
    }

    pub(crate) fn with_header(header: Header) -> Self {
        Self {
            header,
            job_id: [0; JOB_ID_LEN],
        }
    }

    pub fn job_id(&self) -> [u8; JOB_ID_LEN] {
        self.job_id
    }

    pub fn set_job_id(&mut self, id: [u8; JOB_ID_LEN]) {
        self.job_id = id;
    }

    pub fn encoded_len(&self) -> usize {
        JOB_MESSAGE_LEN
    }

    pub fn encode_into(&self, out: &mut impl BufMut) {
        self.header.encode_into(out);
        out.put_slice(&self.job_id);
    }

    /// Decode a Start or End message
    pub fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with(buf, TrailingBytes::Ignore)
    }

    pub fn decode_with(buf: &[u8], policy: TrailingBytes) -> Result<Self> {
        let expected = match peek_message_type(buf)? {
            mt @ (MessageType::Start | MessageType::End) => mt,
            actual => {
                return Err(ProtocolError::TypeMismatch {
                    expected: MessageType::Start,
                    actual,
                })
            }
        };
        Self::decode_tagged(buf, expected, policy)
    }

    pub(crate) fn decode_tagged(
        buf: &[u8],
        expected: MessageType,
        policy: TrailingBytes,
    ) -> Result<Self> {
        let header = expect_header(buf, expected)?;
        let job_id = read_array::<JOB_ID_LEN>(buf, JOB_ID_OFFSET)?;
        check_trailing(buf, JOB_MESSAGE_LEN, policy)?;
        Ok(Self { header, job_id })
    }
}
