//! Property tests for the message codec
//!
//! Any message built through the public API must decode back to itself,
//! and arbitrary input must never panic the parser.

use bytes::Bytes;
use npmp::protocol::{
    parse, DataMessage, DataType, InformMessage, JobMessage, Message, MessageType, NakCode,
    NakMessage, NetInterface, NetType, OptionCode, OptionEntry, RegisterMessage, SettingsMessage,
};
use proptest::prelude::*;
use std::net::Ipv4Addr;

fn net_interface() -> impl Strategy<Value = NetInterface> {
    (
        any::<u8>().prop_map(NetType::from),
        any::<[u8; 6]>(),
        any::<[u8; 4]>(),
    )
        .prop_map(|(kind, mac, ip)| NetInterface::new(kind, mac, Ipv4Addr::from(ip)))
}

fn option_code() -> impl Strategy<Value = OptionCode> {
    any::<u8>().prop_map(OptionCode::from)
}

fn message() -> impl Strategy<Value = Message> {
    prop_oneof![
        (any::<[u8; 16]>(), prop::collection::vec(net_interface(), 0..8)).prop_map(
            |(client_id, interfaces)| {
                let mut m = RegisterMessage::new();
                m.set_client_id(client_id);
                for interface in interfaces {
                    m.add_interface(interface).unwrap();
                }
                Message::from(m)
            }
        ),
        (any::<bool>(), any::<[u8; 4]>()).prop_map(|(is_start, job_id)| {
            let mut m = if is_start {
                JobMessage::start()
            } else {
                JobMessage::end()
            };
            m.set_job_id(job_id);
            Message::from(m)
        }),
        (
            any::<[u8; 4]>(),
            any::<u8>().prop_map(DataType::from),
            prop::collection::vec(any::<u8>(), 0..128),
        )
            .prop_map(|(job_id, data_type, payload)| {
                let mut m = DataMessage::new();
                m.set_job_id(job_id);
                m.set_data_type(data_type);
                m.set_data(payload);
                Message::from(m)
            }),
        prop::collection::vec(option_code(), 0..16).prop_map(|codes| {
            let mut m = InformMessage::new();
            m.set_options(codes);
            Message::from(m)
        }),
        any::<u8>().prop_map(|code| {
            let mut m = NakMessage::new();
            m.set_response_code(NakCode::from(code));
            Message::from(m)
        }),
        prop::collection::vec(
            (option_code(), prop::collection::vec(any::<u8>(), 0..64)),
            0..6
        )
        .prop_map(|options| {
            let mut m = SettingsMessage::new();
            for (code, value) in options {
                m.add_option(OptionEntry::new(code, Bytes::from(value))).unwrap();
            }
            Message::from(m)
        }),
        prop_oneof![
            Just(MessageType::Null),
            Just(MessageType::Disconnect),
            Just(MessageType::Version),
            Just(MessageType::Ack),
        ]
        .prop_map(Message::new),
    ]
}

proptest! {
    #[test]
    fn prop_encode_then_parse_is_identity(m in message()) {
        let bytes = m.encode();
        prop_assert_eq!(bytes.len(), m.encoded_len());
        prop_assert_eq!(parse(&bytes).unwrap(), m);
    }

    #[test]
    fn prop_parse_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..96)) {
        let _ = parse(&bytes);
    }

    #[test]
    fn prop_truncated_register_is_rejected(
        interfaces in prop::collection::vec(net_interface(), 1..6),
        cut in 1usize..11,
    ) {
        let mut m = RegisterMessage::new();
        for interface in interfaces {
            m.add_interface(interface).unwrap();
        }
        let bytes = Message::from(m).encode();
        prop_assert!(parse(&bytes[..bytes.len() - cut]).is_err());
    }
}
