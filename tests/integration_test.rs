//! Integration tests for message exchange between a controller and an agent
//!
//! Runs two endpoints over loopback UDP and drives a registration flow.

use bytes::Bytes;
use npmp::codec::DatagramCodec;
use npmp::endpoint::Endpoint;
use npmp::protocol::{
    Decoder, Message, MessageType, NetInterface, NetType, OptionCode, OptionEntry,
    RegisterMessage, SettingsMessage, TrailingBytes,
};
use npmp::transport::{Outgoing, Transport, TransportChannels, UdpTransport};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// Helpers
// =============================================================================

fn spawn_udp(shutdown: &Arc<AtomicBool>) -> TransportChannels {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    UdpTransport::new(addr)
        .spawn(shutdown.clone())
        .expect("bind loopback")
}

fn endpoint(shutdown: &Arc<AtomicBool>) -> Endpoint<DatagramCodec> {
    Endpoint::new(spawn_udp(shutdown), DatagramCodec::default())
}

async fn recv_timeout(
    endpoint: &mut Endpoint<DatagramCodec>,
) -> npmp::endpoint::Received {
    tokio::time::timeout(Duration::from_secs(2), endpoint.recv())
        .await
        .expect("timeout")
        .expect("transport closed")
}

fn register() -> RegisterMessage {
    let mut m = RegisterMessage::new();
    m.set_client_id(*b"agent-0000000001");
    m.add_interface(NetInterface::new(
        NetType::WiredEthernet,
        [0x02, 0x42, 0xac, 0x11, 0x00, 0x02],
        Ipv4Addr::new(10, 0, 0, 2),
    ))
    .unwrap();
    m
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_register_then_settings_reply() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut controller = endpoint(&shutdown);
    let mut agent = endpoint(&shutdown);

    agent
        .send(controller.local_addr(), &register().into())
        .await
        .unwrap();

    let received = recv_timeout(&mut controller).await;
    assert_eq!(received.peer, agent.local_addr());
    match &received.message {
        Message::Register(m) => {
            assert_eq!(m.client_id(), b"agent-0000000001");
            assert_eq!(m.interface_count(), 1);
            assert_eq!(m.interfaces()[0].ipv4_address, Ipv4Addr::new(10, 0, 0, 2));
        }
        other => panic!("Expected Register, got {:?}", other),
    }

    let mut settings = SettingsMessage::new();
    settings
        .add_option(OptionEntry::new(
            OptionCode::HeartbeatDuration,
            Bytes::copy_from_slice(&60u32.to_le_bytes()),
        ))
        .unwrap();
    controller.reply(&settings.clone().into()).await.unwrap();

    let reply = recv_timeout(&mut agent).await;
    assert_eq!(reply.message, Message::Settings(settings));

    shutdown.store(true, Ordering::SeqCst);
}

#[tokio::test]
async fn test_malformed_datagrams_are_skipped() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let mut controller = endpoint(&shutdown);
    let raw = spawn_udp(&shutdown);

    let target = Some(controller.local_addr());
    let datagrams: Vec<&'static [u8]> = vec![
        // Unknown type tag
        &[0, b'P', b'M', 0x7f],
        // Register claiming one interface with none present
        &[
            0, b'P', b'M', 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ],
        // Settings option declaring more bytes than remain
        &[0, b'P', b'M', 10, 8, 50, 0, 0, 0, b'h'],
        // Wrong cookie
        &[0, b'X', b'X', 8],
        // Valid Disconnect
        &[0, b'P', b'M', 2],
    ];
    for payload in datagrams {
        raw.tx
            .send(Outgoing {
                peer: target,
                payload: Bytes::from_static(payload),
            })
            .await
            .unwrap();
    }

    let received = recv_timeout(&mut controller).await;
    assert_eq!(received.message.message_type(), MessageType::Disconnect);

    let stats = controller.stats().snapshot();
    assert_eq!(stats.rejected, 4);
    assert_eq!(stats.rx_messages, 1);

    shutdown.store(true, Ordering::SeqCst);
}

#[tokio::test]
async fn test_strict_endpoint_rejects_trailing_bytes() {
    let shutdown = Arc::new(AtomicBool::new(false));
    let strict = DatagramCodec::new(Decoder::new().with_trailing(TrailingBytes::Reject));
    let mut controller = Endpoint::new(spawn_udp(&shutdown), strict);
    let raw = spawn_udp(&shutdown);

    let mut padded = Message::from(register()).encode().to_vec();
    padded.extend_from_slice(&[0, 0]);
    let exact = Message::from(register()).encode().to_vec();

    for payload in [padded, exact] {
        raw.tx
            .send(Outgoing {
                peer: Some(controller.local_addr()),
                payload: Bytes::from(payload),
            })
            .await
            .unwrap();
    }

    let received = recv_timeout(&mut controller).await;
    assert_eq!(received.message, Message::Register(register()));
    assert_eq!(controller.stats().snapshot().rejected, 1);

    shutdown.store(true, Ordering::SeqCst);
}
