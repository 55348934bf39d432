//! Receiver-side decode policy
//!
//! Structural checks always run. The cookie check and the trailing-bytes
//! strictness are receiver choices and are configured here.

use super::error::Result;
use super::message::{parse_with, Message};
use crate::config::ProtocolConfig;
use crate::constants::MAGIC_COOKIE;

/// What to do with bytes after a fixed-size layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBytes {
    /// Silently ignore them
    #[default]
    Ignore,
    /// Fail with `TrailingBytes`
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    cookie: [u8; 2],
    verify_cookie: bool,
    trailing: TrailingBytes,
}

impl Decoder {
    /// Verifies the default cookie, ignores trailing bytes
    pub fn new() -> Self {
        Self {
            cookie: MAGIC_COOKIE,
            verify_cookie: true,
            trailing: TrailingBytes::Ignore,
        }
    }

    pub fn from_config(config: &ProtocolConfig) -> Self {
        Self {
            cookie: config.cookie(),
            verify_cookie: config.verify_cookie,
            trailing: if config.strict_trailing_bytes {
                TrailingBytes::Reject
            } else {
                TrailingBytes::Ignore
            },
        }
    }

    pub fn with_cookie(mut self, cookie: [u8; 2]) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn verify_cookie(mut self, verify: bool) -> Self {
        self.verify_cookie = verify;
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingBytes) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn trailing(&self) -> TrailingBytes {
        self.trailing
    }

    /// Decode and validate one message
    pub fn parse(&self, buf: &[u8]) -> Result<Message> {
        let message = parse_with(buf, self.trailing)?;
        if self.verify_cookie {
            message.header().verify_cookie(self.cookie)?;
        }
        Ok(message)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
