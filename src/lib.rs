//! NPMP - Network Performance Measurement Protocol
//!
//! Binary message codec used between a measurement controller and its
//! agents to coordinate ping/iperf jobs, plus a small UDP endpoint.
//!
//! - [`protocol`]: header, message variants, option and interface encodings
//! - [`codec`]: datagram codec applying the receiver's validation policy
//! - [`transport`] / [`endpoint`]: UDP I/O and message exchange

pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod transport;

pub use error::{Error, Result};
pub use protocol::{parse, Message, MessageType, ProtocolError};
