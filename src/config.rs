//! Configuration management
//!
//! Config is read from `npmp.toml` in the working directory unless a path is
//! given explicitly. Every field has a default, so a partial or missing file
//! is fine.

use crate::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_UDP_PORT, MAGIC_COOKIE, PROTOCOL_VERSION};
use crate::error::{Error, Result};
use crate::protocol::{Header, MessageType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default config file name
pub const CONFIG_FILE: &str = "npmp.toml";

// =============================================================================
// Application Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub protocol: ProtocolConfig,
    pub network: NetworkConfig,
}

// =============================================================================
// Protocol Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Magic cookie, exactly two ASCII bytes
    pub magic_cookie: String,

    /// Version written into outgoing headers
    pub version: u8,

    /// Reject inbound messages whose cookie differs from `magic_cookie`
    pub verify_cookie: bool,

    /// Reject bytes after fixed-size layouts instead of ignoring them
    pub strict_trailing_bytes: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            magic_cookie: String::from_utf8_lossy(&MAGIC_COOKIE).into_owned(),
            version: PROTOCOL_VERSION,
            verify_cookie: true,
            strict_trailing_bytes: false,
        }
    }
}

impl ProtocolConfig {
    /// Cookie bytes; falls back to the default when the configured value is invalid
    ///
    /// `validate` reports the invalid case; this accessor never fails.
    pub fn cookie(&self) -> [u8; 2] {
        self.magic_cookie
            .as_bytes()
            .try_into()
            .unwrap_or(MAGIC_COOKIE)
    }

    /// Header for an outgoing message carrying the configured cookie and version
    pub fn header(&self, message_type: MessageType) -> Header {
        let mut header = Header::with_cookie(message_type, self.cookie());
        header.set_version(self.version);
        header
    }
}

// =============================================================================
// Network Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Local address to bind
    pub bind_address: String,

    /// UDP port
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_UDP_PORT,
        }
    }
}

impl NetworkConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|_| Error::ConfigValidation {
                field: "network.bind_address",
                reason: format!("'{}' is not an IP address", self.bind_address),
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// =============================================================================
// Loading
// =============================================================================

impl Config {
    /// Check values serde cannot express
    pub fn validate(&self) -> Result<()> {
        let cookie_len = self.protocol.magic_cookie.len();
        if cookie_len != 2 {
            return Err(Error::ConfigValidation {
                field: "protocol.magic_cookie",
                reason: format!("must be exactly 2 bytes, got {}", cookie_len),
            });
        }
        self.network.socket_addr()?;
        Ok(())
    }
}

/// Load and validate config from `path`. Missing file yields defaults.
pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Load config from `npmp.toml`, falling back to defaults on any error
pub fn load() -> Config {
    let path = PathBuf::from(CONFIG_FILE);
    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

/// Save config to `path`
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config).map_err(|e| Error::ConfigValidation {
        field: "config",
        reason: e.to_string(),
    })?;
    fs::write(path, content).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.protocol.magic_cookie, "PM");
        assert_eq!(config.protocol.cookie(), *b"PM");
        assert_eq!(config.protocol.version, 0);
        assert!(config.protocol.verify_cookie);
        assert!(!config.protocol.strict_trailing_bytes);
        assert_eq!(config.network.bind_address, "127.0.0.1");
        assert_eq!(config.network.port, DEFAULT_UDP_PORT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.protocol.magic_cookie, "PM");
        assert_eq!(config.network.port, DEFAULT_UDP_PORT);
    }

    #[test]
    fn test_config_partial_section() {
        let partial = r#"
[protocol]
strict_trailing_bytes = true
"#;
        let config: Config = toml::from_str(partial).unwrap();
        assert!(config.protocol.strict_trailing_bytes);
        assert!(config.protocol.verify_cookie);
        assert_eq!(config.protocol.magic_cookie, "PM");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            protocol: ProtocolConfig {
                magic_cookie: "NP".to_string(),
                version: 3,
                verify_cookie: false,
                strict_trailing_bytes: true,
            },
            network: NetworkConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 9400,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(restored.protocol.magic_cookie, "NP");
        assert_eq!(restored.protocol.version, 3);
        assert!(!restored.protocol.verify_cookie);
        assert!(restored.protocol.strict_trailing_bytes);
        assert_eq!(restored.network.bind_address, "0.0.0.0");
        assert_eq!(restored.network.port, 9400);
    }

    #[test]
    fn test_validate_cookie_length() {
        let mut config = Config::default();
        config.protocol.magic_cookie = "NPM".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigValidation {
                field: "protocol.magic_cookie",
                ..
            })
        ));
        // Accessor falls back rather than truncating
        assert_eq!(config.protocol.cookie(), *b"PM");
    }

    #[test]
    fn test_validate_bind_address() {
        let mut config = Config::default();
        config.network.bind_address = "localhost:9".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_configured_header() {
        let protocol = ProtocolConfig {
            magic_cookie: "XY".to_string(),
            version: 1,
            ..ProtocolConfig::default()
        };
        let header = protocol.header(MessageType::Ack);
        assert_eq!(header.cookie(), *b"XY");
        assert_eq!(header.version(), 1);
        assert_eq!(header.message_type(), MessageType::Ack);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let config = load_from(Path::new("/nonexistent/npmp.toml")).unwrap();
        assert_eq!(config.network.port, DEFAULT_UDP_PORT);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("npmp-config-{}.toml", std::process::id()));
        let mut config = Config::default();
        config.network.port = 9555;
        save(&config, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.network.port, 9555);
        let _ = fs::remove_file(&path);
    }
}
