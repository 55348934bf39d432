//! Centralized error types for the endpoint and CLI
//!
//! Wire-level failures are `ProtocolError`; everything around them
//! (config, sockets, runtime, CLI input) is an `Error`.
//! Use `Result<T>` as shorthand for `std::result::Result<T, Error>`.

use crate::protocol::ProtocolError;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    // === Codec ===
    /// Message could not be decoded or built
    Protocol(ProtocolError),

    // === Network ===
    /// Failed to bind UDP socket
    UdpBind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },
    /// Transport channel closed before the message was queued
    TransportClosed,

    // === Config ===
    /// Failed to read config file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write config file
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected schema
    ConfigParse { path: PathBuf, reason: String },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === CLI ===
    /// Hex input could not be decoded
    HexInput { source: hex::FromHexError },

    // === Runtime ===
    /// Tokio runtime creation failed
    Runtime { source: std::io::Error },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(source) => Some(source),
            Self::UdpBind { source, .. }
            | Self::ConfigRead { source, .. }
            | Self::ConfigWrite { source, .. }
            | Self::Runtime { source } => Some(source),
            Self::HexInput { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "Protocol error: {}", e),
            Self::UdpBind { addr, .. } => write!(f, "Cannot bind UDP socket {}", addr),
            Self::TransportClosed => write!(f, "Transport closed"),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config: {}", path.display())
            }
            Self::ConfigWrite { path, .. } => {
                write!(f, "Cannot write config: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::HexInput { .. } => write!(f, "Input is not valid hex"),
            Self::Runtime { .. } => write!(f, "Failed to create runtime"),
        }
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}

/// Alias for Result with Error
pub type Result<T> = std::result::Result<T, Error>;
