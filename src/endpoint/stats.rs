//! Traffic statistics for an endpoint
//!
//! Thread-safe counters using lock-free atomics.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Stats {
    /// Messages successfully decoded
    rx_messages: AtomicU64,
    /// Bytes of successfully decoded messages
    rx_bytes: AtomicU64,
    /// Datagrams that failed validation
    rejected: AtomicU64,
    /// Messages queued for sending
    tx_messages: AtomicU64,
    /// Bytes queued for sending
    tx_bytes: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub rx_messages: u64,
    pub rx_bytes: u64,
    pub rejected: u64,
    pub tx_messages: u64,
    pub tx_bytes: u64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_rx(&self, bytes: usize) {
        self.rx_messages.fetch_add(1, Ordering::Relaxed);
        self.rx_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_tx(&self, bytes: usize) {
        self.tx_messages.fetch_add(1, Ordering::Relaxed);
        self.tx_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rx_messages: self.rx_messages.load(Ordering::Relaxed),
            rx_bytes: self.rx_bytes.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            tx_messages: self.tx_messages.load(Ordering::Relaxed),
            tx_bytes: self.tx_bytes.load(Ordering::Relaxed),
        }
    }
}
