//! UDP transport for controller/agent traffic
//!
//! Binds a local address and exchanges whole datagrams. Outgoing datagrams
//! name their destination; those without one go to the last peer that sent
//! us data, which is how an agent answers its controller.
//!
//! Uses async tokio tasks for I/O:
//! - RX task: receives datagrams, tracks the last peer, sends to channel
//! - TX task: receives from channel, sends to the resolved peer

use super::{Datagram, Outgoing, Transport, TransportChannels};
use crate::constants::{
    CHANNEL_CAPACITY, MAX_SOCKET_RETRY_ATTEMPTS, RETRY_BASE_DELAY_MS, SHUTDOWN_POLL_MS,
    UDP_BUFFER_SIZE,
};
use crate::error::{Error, Result};
use bytes::Bytes;
use parking_lot::RwLock;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct UdpTransport {
    addr: SocketAddr,
}

impl UdpTransport {
    /// Create a UDP transport bound to `addr` (port 0 picks a free port)
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

impl Transport for UdpTransport {
    fn spawn(self, shutdown: Arc<AtomicBool>) -> Result<TransportChannels> {
        let (in_tx, in_rx) = mpsc::channel::<Datagram>(CHANNEL_CAPACITY);
        let (out_tx, mut out_rx) = mpsc::channel::<Outgoing>(CHANNEL_CAPACITY);

        let socket = create_reusable_udp_socket(self.addr)?;
        let local_addr = socket.local_addr().map_err(|e| Error::UdpBind {
            addr: self.addr,
            source: e,
        })?;
        debug!("UDP transport bound to {}", local_addr);

        // Last peer that sent us data
        let last_peer: Arc<RwLock<Option<SocketAddr>>> = Arc::new(RwLock::new(None));

        // RX task (async)
        let socket_rx = socket.clone();
        let peer_store = last_peer.clone();
        let shutdown_rx = shutdown.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; UDP_BUFFER_SIZE];

            while !shutdown_rx.load(Ordering::Relaxed) {
                match tokio::time::timeout(
                    Duration::from_millis(SHUTDOWN_POLL_MS),
                    socket_rx.recv_from(&mut buf),
                )
                .await
                {
                    Ok(Ok((len, peer))) => {
                        *peer_store.write() = Some(peer);

                        let datagram = Datagram {
                            peer,
                            payload: Bytes::copy_from_slice(&buf[..len]),
                        };
                        if in_tx.send(datagram).await.is_err() {
                            // Channel closed
                            break;
                        }
                    }
                    Ok(Err(e)) => {
                        // Socket recv error - continue polling
                        debug!("UDP recv error: {}", e);
                    }
                    Err(_) => {
                        // Timeout - expected, allows checking shutdown flag
                    }
                }
            }
        });

        // TX task (async)
        let socket_tx = socket;
        let peer_read = last_peer;
        let shutdown_tx = shutdown;
        tokio::spawn(async move {
            while !shutdown_tx.load(Ordering::Relaxed) {
                match tokio::time::timeout(Duration::from_millis(SHUTDOWN_POLL_MS), out_rx.recv())
                    .await
                {
                    Ok(Some(outgoing)) => {
                        // Resolve destination (drop lock before await)
                        let dest = outgoing.peer.or(*peer_read.read());
                        match dest {
                            Some(addr) => {
                                if let Err(e) = socket_tx.send_to(&outgoing.payload, addr).await {
                                    warn!("UDP send to {} failed: {}", addr, e);
                                }
                            }
                            None => debug!("No peer known yet, dropping datagram"),
                        }
                    }
                    Ok(None) => {
                        // Channel closed
                        break;
                    }
                    Err(_) => {
                        // Timeout - check shutdown flag
                    }
                }
            }
        });

        Ok(TransportChannels {
            rx: in_rx,
            tx: out_tx,
            local_addr,
        })
    }
}

/// Create a UDP socket with SO_REUSEADDR for quick rebind after restart
///
/// Retries a few times if the address is still in use (e.g., from previous run).
fn create_reusable_udp_socket(addr: SocketAddr) -> Result<Arc<UdpSocket>> {
    let map_err = |e| Error::UdpBind { addr, source: e };

    for attempt in 0..MAX_SOCKET_RETRY_ATTEMPTS {
        let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))
            .map_err(map_err)?;
        socket.set_reuse_address(true).map_err(map_err)?;
        socket.set_nonblocking(true).map_err(map_err)?;

        match socket.bind(&addr.into()) {
            Ok(_) => {
                let std_socket: std::net::UdpSocket = socket.into();
                let tokio_socket = UdpSocket::from_std(std_socket).map_err(map_err)?;
                return Ok(Arc::new(tokio_socket));
            }
            Err(_) if attempt < MAX_SOCKET_RETRY_ATTEMPTS - 1 => {
                // Exponential backoff: 200ms, 400ms, 800ms, 1600ms
                std::thread::sleep(Duration::from_millis(RETRY_BASE_DELAY_MS * (1 << attempt)));
            }
            Err(e) => return Err(map_err(e)),
        }
    }

    Err(Error::UdpBind {
        addr,
        source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "failed after retries"),
    })
}
