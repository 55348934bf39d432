//! Message sum type and dispatch
//!
//! A received datagram is inspected only at the type tag (offset 3) to pick a
//! variant; that variant's decoder then validates its own layout.

use super::decoder::TrailingBytes;
use super::error::{ProtocolError, Result};
use super::header::{peek_message_type, Header};
use super::messages::{
    decode_bare, DataMessage, InformMessage, JobMessage, NakMessage, RegisterMessage,
    SettingsMessage,
};
use super::types::MessageType;
use bytes::{BufMut, Bytes, BytesMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Null(Header),
    Register(RegisterMessage),
    Disconnect(Header),
    Start(JobMessage),
    End(JobMessage),
    Data(DataMessage),
    Inform(InformMessage),
    Version(Header),
    Ack(Header),
    Nak(NakMessage),
    Settings(SettingsMessage),
}

impl Message {
    /// Fresh message of the given type with default field values
    pub fn new(message_type: MessageType) -> Self {
        Self::with_header(Header::new(message_type))
    }

    /// Fresh message built around an existing header (e.g. a configured cookie)
    pub fn with_header(header: Header) -> Self {
        match header.message_type() {
            MessageType::Null => Self::Null(header),
            MessageType::Register => Self::Register(RegisterMessage::with_header(header)),
            MessageType::Disconnect => Self::Disconnect(header),
            MessageType::Start => Self::Start(JobMessage::with_header(header)),
            MessageType::End => Self::End(JobMessage::with_header(header)),
            MessageType::Data => Self::Data(DataMessage::with_header(header)),
            MessageType::Inform => Self::Inform(InformMessage::with_header(header)),
            MessageType::Version => Self::Version(header),
            MessageType::Ack => Self::Ack(header),
            MessageType::Nak => Self::Nak(NakMessage::with_header(header)),
            MessageType::Settings => Self::Settings(SettingsMessage::with_header(header)),
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            Self::Null(h) | Self::Disconnect(h) | Self::Version(h) | Self::Ack(h) => h,
            Self::Register(m) => m.header(),
            Self::Start(m) | Self::End(m) => m.header(),
            Self::Data(m) => m.header(),
            Self::Inform(m) => m.header(),
            Self::Nak(m) => m.header(),
            Self::Settings(m) => m.header(),
        }
    }

    fn header_mut(&mut self) -> &mut Header {
        match self {
            Self::Null(h) | Self::Disconnect(h) | Self::Version(h) | Self::Ack(h) => h,
            Self::Register(m) => m.header_mut(),
            Self::Start(m) | Self::End(m) => m.header_mut(),
            Self::Data(m) => m.header_mut(),
            Self::Inform(m) => m.header_mut(),
            Self::Nak(m) => m.header_mut(),
            Self::Settings(m) => m.header_mut(),
        }
    }

    #[inline]
    pub fn message_type(&self) -> MessageType {
        self.header().message_type()
    }

    /// The type tag follows the variant and cannot be changed in place
    pub fn set_version(&mut self, version: u8) {
        self.header_mut().set_version(version);
    }

    /// See [`Header::set_cookie`]
    pub fn set_cookie(&mut self, cookie: &[u8]) -> Result<()> {
        self.header_mut().set_cookie(cookie)
    }

    /// Exact number of bytes `encode` produces
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Null(_) | Self::Disconnect(_) | Self::Version(_) | Self::Ack(_) => {
                crate::constants::HEADER_LEN
            }
            Self::Register(m) => m.encoded_len(),
            Self::Start(m) | Self::End(m) => m.encoded_len(),
            Self::Data(m) => m.encoded_len(),
            Self::Inform(m) => m.encoded_len(),
            Self::Nak(m) => m.encoded_len(),
            Self::Settings(m) => m.encoded_len(),
        }
    }

    /// Append the wire form to `out`
    pub fn encode_into(&self, out: &mut impl BufMut) {
        match self {
            Self::Null(h) | Self::Disconnect(h) | Self::Version(h) | Self::Ack(h) => {
                h.encode_into(out)
            }
            Self::Register(m) => m.encode_into(out),
            Self::Start(m) | Self::End(m) => m.encode_into(out),
            Self::Data(m) => m.encode_into(out),
            Self::Inform(m) => m.encode_into(out),
            Self::Nak(m) => m.encode_into(out),
            Self::Settings(m) => m.encode_into(out),
        }
    }

    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out.freeze()
    }
}

macro_rules! impl_from_variant {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(m: $ty) -> Self {
                    Self::$variant(m)
                }
            }
        )*
    };
}

impl_from_variant! {
    RegisterMessage => Register,
    DataMessage => Data,
    InformMessage => Inform,
    NakMessage => Nak,
    SettingsMessage => Settings,
}

impl From<JobMessage> for Message {
    fn from(m: JobMessage) -> Self {
        match m.header().message_type() {
            MessageType::End => Self::End(m),
            _ => Self::Start(m),
        }
    }
}

/// Decode any message, ignoring trailing bytes after fixed layouts
pub fn parse(buf: &[u8]) -> Result<Message> {
    parse_with(buf, TrailingBytes::Ignore)
}

/// Decode any message under the given trailing-bytes policy
pub fn parse_with(buf: &[u8], policy: TrailingBytes) -> Result<Message> {
    let message_type = peek_message_type(buf)?;
    decode_tagged(buf, message_type, policy)
}

/// Decode `buf`, requiring its tag to be `expected`
pub fn decode_as(buf: &[u8], expected: MessageType) -> Result<Message> {
    let actual = peek_message_type(buf)?;
    if actual != expected {
        return Err(ProtocolError::TypeMismatch { expected, actual });
    }
    decode_tagged(buf, actual, TrailingBytes::Ignore)
}

fn decode_tagged(buf: &[u8], message_type: MessageType, policy: TrailingBytes) -> Result<Message> {
    let message = match message_type {
        MessageType::Null => Message::Null(decode_bare(buf, message_type, policy)?),
        MessageType::Disconnect => Message::Disconnect(decode_bare(buf, message_type, policy)?),
        MessageType::Version => Message::Version(decode_bare(buf, message_type, policy)?),
        MessageType::Ack => Message::Ack(decode_bare(buf, message_type, policy)?),
        MessageType::Register => Message::Register(RegisterMessage::decode_with(buf, policy)?),
        MessageType::Start | MessageType::End => {
            let job = JobMessage::decode_tagged(buf, message_type, policy)?;
            if message_type == MessageType::Start {
                Message::Start(job)
            } else {
                Message::End(job)
            }
        }
        MessageType::Data => Message::Data(DataMessage::decode(buf)?),
        MessageType::Inform => Message::Inform(InformMessage::decode(buf)?),
        MessageType::Nak => Message::Nak(NakMessage::decode_with(buf, policy)?),
        MessageType::Settings => Message::Settings(SettingsMessage::decode(buf)?),
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{DataType, NakCode, NetInterface, NetType, OptionCode, OptionEntry};
    use std::net::Ipv4Addr;

    const ALL_TYPES: [MessageType; 11] = [
        MessageType::Null,
        MessageType::Register,
        MessageType::Disconnect,
        MessageType::Start,
        MessageType::End,
        MessageType::Data,
        MessageType::Inform,
        MessageType::Version,
        MessageType::Ack,
        MessageType::Nak,
        MessageType::Settings,
    ];

    #[test]
    fn test_constructors_set_header() {
        for mt in ALL_TYPES {
            let m = Message::new(mt);
            assert_eq!(m.message_type(), mt);
            assert_eq!(m.header().version(), 0);
            assert_eq!(m.header().cookie(), *b"PM");
            assert_eq!(m.encode().len(), m.encoded_len());
        }
    }

    #[test]
    fn test_every_default_message_roundtrips() {
        for mt in ALL_TYPES {
            let m = Message::new(mt);
            assert_eq!(parse(&m.encode()).unwrap(), m);
        }
    }

    #[test]
    fn test_populated_roundtrip() {
        let mut reg = RegisterMessage::new();
        reg.set_client_id([7; 16]);
        reg.add_interface(NetInterface::new(
            NetType::WiredEthernet,
            [0, 1, 2, 3, 4, 5],
            Ipv4Addr::new(172, 16, 4, 2),
        ))
        .unwrap();

        let mut data = DataMessage::new();
        data.set_data_type(DataType::Iperf3);
        data.set_data(Bytes::from_static(b"{\"bps\": 940000000}"));

        let mut settings = SettingsMessage::new();
        settings
            .add_option(OptionEntry::new(
                OptionCode::IperfServerAddress,
                Bytes::from_static(b"10.1.1.1"),
            ))
            .unwrap();

        for m in [Message::from(reg), data.into(), settings.into()] {
            assert_eq!(parse(&m.encode()).unwrap(), m);
        }
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(
            parse(&[0, b'P', b'M', 42]),
            Err(ProtocolError::UnknownType(42))
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            parse(&[]),
            Err(ProtocolError::TooShort { needed: 4, .. })
        ));
    }

    #[test]
    fn test_parse_register_claiming_missing_interface() {
        let mut buf = Message::new(MessageType::Register).encode().to_vec();
        buf[20] = 1;
        assert_eq!(
            parse(&buf),
            Err(ProtocolError::TooShort {
                needed: 32,
                actual: 21
            })
        );
    }

    #[test]
    fn test_decode_as_mismatch() {
        let buf = Message::new(MessageType::Ack).encode();
        assert_eq!(
            decode_as(&buf, MessageType::Nak),
            Err(ProtocolError::TypeMismatch {
                expected: MessageType::Nak,
                actual: MessageType::Ack
            })
        );
        assert!(decode_as(&buf, MessageType::Ack).is_ok());
    }

    #[test]
    fn test_end_from_job_message() {
        let m: Message = JobMessage::end().into();
        assert_eq!(m.message_type(), MessageType::End);
        assert!(matches!(m, Message::End(_)));
    }

    #[test]
    fn test_parse_with_rejects_trailing() {
        let mut buf = Message::new(MessageType::Start).encode().to_vec();
        buf.push(0);
        assert!(parse(&buf).is_ok());
        assert!(matches!(
            parse_with(&buf, TrailingBytes::Reject),
            Err(ProtocolError::TrailingBytes { .. })
        ));
    }

    #[test]
    fn test_header_setters_keep_variant_tag() {
        let mut m = Message::from(DataMessage::new());
        m.set_version(4);
        m.set_cookie(b"NP").unwrap();
        assert!(m.set_cookie(b"NPM").is_err());

        let bytes = m.encode();
        assert_eq!(&bytes[..4], &[4, b'N', b'P', MessageType::Data as u8]);
        assert_eq!(parse(&bytes).unwrap(), m);
        assert!(matches!(m, Message::Data(_)));

        let mut nak = NakMessage::new();
        nak.set_version(2);
        assert_eq!(nak.header().message_type(), MessageType::Nak);
        let nak = Message::from(nak);
        assert_eq!(parse(&nak.encode()).unwrap(), nak);
    }

    #[test]
    fn test_unknown_enum_bytes_are_kept() {
        match parse(&[0, b'P', b'M', 9, 5]).unwrap() {
            Message::Nak(m) => assert_eq!(m.response_code(), NakCode::Unknown(5)),
            other => panic!("Expected Nak, got {:?}", other),
        }
        match parse(&[0, b'P', b'M', 5, 0, 0, 0, 0, 3]).unwrap() {
            Message::Data(m) => {
                assert_eq!(m.data_type(), DataType::Unknown(3));
                assert!(m.data().is_empty());
            }
            other => panic!("Expected Data, got {:?}", other),
        }
    }
}
