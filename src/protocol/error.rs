//! Codec errors
//!
//! Every decode failure is returned as a `ProtocolError`; none of them panic.
//! A few variants are precondition failures on the build side (cookie size,
//! interface count, option size) and are returned by the mutating accessors.

use super::types::MessageType;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    // === Structure ===
    /// Buffer is shorter than the fixed region of the expected variant
    TooShort { needed: usize, actual: usize },
    /// An option declares more value bytes than remain
    Truncated {
        offset: usize,
        declared: usize,
        remaining: usize,
    },
    /// An option header (code + length) would read past the buffer end
    MalformedLength { offset: usize, remaining: usize },
    /// Bytes left over after a fixed-size layout (strict decoding only)
    TrailingBytes { expected: usize, actual: usize },

    // === Dispatch ===
    /// Type tag is not one of the known message types
    UnknownType(u8),
    /// Caller asked for one variant but the tag names another
    TypeMismatch {
        expected: MessageType,
        actual: MessageType,
    },

    // === Field values ===
    /// Cookie does not match the configured magic value
    BadCookie { expected: [u8; 2], actual: [u8; 2] },

    // === Preconditions ===
    /// Cookie must be exactly two bytes
    CookieLength { len: usize },
    /// Register can carry at most 255 interfaces
    TooManyInterfaces,
    /// Option value length does not fit the 32-bit length field
    OptionTooLarge { len: usize },
}

impl std::error::Error for ProtocolError {}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { needed, actual } => {
                write!(f, "Message too short: need {} bytes, got {}", needed, actual)
            }
            Self::Truncated {
                offset,
                declared,
                remaining,
            } => write!(
                f,
                "Option at offset {} declares {} bytes but only {} remain",
                offset, declared, remaining
            ),
            Self::MalformedLength { offset, remaining } => write!(
                f,
                "Option header at offset {} needs 5 bytes, {} remain",
                offset, remaining
            ),
            Self::TrailingBytes { expected, actual } => write!(
                f,
                "Unexpected trailing bytes: expected {} bytes, got {}",
                expected, actual
            ),
            Self::UnknownType(tag) => write!(f, "Unknown message type: {}", tag),
            Self::TypeMismatch { expected, actual } => {
                write!(f, "Expected {:?} message, got {:?}", expected, actual)
            }
            Self::BadCookie { expected, actual } => write!(
                f,
                "Bad magic cookie: expected {:02x?}, got {:02x?}",
                expected, actual
            ),
            Self::CookieLength { len } => {
                write!(f, "Magic cookie must be 2 bytes, got {}", len)
            }
            Self::TooManyInterfaces => write!(f, "Register message is full (255 interfaces)"),
            Self::OptionTooLarge { len } => {
                write!(f, "Option value too large: {} bytes", len)
            }
        }
    }
}

/// Alias for Result with ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
