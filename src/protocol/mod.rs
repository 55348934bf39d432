//! NPMP wire codec
//!
//! Every message starts with a 4-byte header:
//!
//! | Offset | Field        | Size |
//! |--------|--------------|------|
//! | 0      | version      | 1    |
//! | 1..3   | magic cookie | 2    |
//! | 3      | message type | 1    |
//! | 4..    | payload      | var  |
//!
//! Multi-byte integers are little-endian. Building a message never touches a
//! shared buffer: variants hold typed fields and `encode` linearizes them.

mod decoder;
mod error;
mod header;
mod interface;
mod message;
mod messages;
mod options;
mod types;

pub use decoder::{Decoder, TrailingBytes};
pub use error::{ProtocolError, Result};
pub use header::{peek_message_type, Header};
pub use interface::{MacAddr, NetInterface};
pub use message::{decode_as, parse, parse_with, Message};
pub use messages::{
    DataMessage, InformMessage, JobMessage, NakMessage, RegisterMessage, SettingsMessage,
};
pub use options::OptionEntry;
pub use types::{DataType, MessageType, NakCode, NetType, OptionCode};
