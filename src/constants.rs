//! Protocol-wide constants
//!
//! Wire offsets and sizes live here so the per-message codecs and the
//! dispatcher agree on one layout.

// =============================================================================
// Header
// =============================================================================

/// Default magic cookie carried at offsets 1..3 of every message
pub const MAGIC_COOKIE: [u8; 2] = *b"PM";

/// Protocol version written by the constructors
pub const PROTOCOL_VERSION: u8 = 0;

/// Size of the common header (version + cookie + type)
pub const HEADER_LEN: usize = 4;

pub const VERSION_OFFSET: usize = 0;
pub const COOKIE_OFFSET: usize = 1;
pub const COOKIE_LEN: usize = 2;
pub const TYPE_OFFSET: usize = 3;

// =============================================================================
// Fixed fields
// =============================================================================

/// Job id (Start, End, Data) at offsets 4..8
pub const JOB_ID_OFFSET: usize = HEADER_LEN;
pub const JOB_ID_LEN: usize = 4;

/// Start/End messages are exactly header + job id
pub const JOB_MESSAGE_LEN: usize = JOB_ID_OFFSET + JOB_ID_LEN;

/// Data type tag in Data messages
pub const DATA_TYPE_OFFSET: usize = 8;

/// First payload byte of a Data message
pub const DATA_PAYLOAD_OFFSET: usize = 9;

/// Response code in NAK messages
pub const NAK_CODE_OFFSET: usize = HEADER_LEN;
pub const NAK_MESSAGE_LEN: usize = NAK_CODE_OFFSET + 1;

// =============================================================================
// Register
// =============================================================================

pub const CLIENT_ID_OFFSET: usize = HEADER_LEN;
pub const CLIENT_ID_LEN: usize = 16;

/// Interface count byte at offset 20
pub const INTERFACE_COUNT_OFFSET: usize = CLIENT_ID_OFFSET + CLIENT_ID_LEN;

/// Fixed Register prefix: header + client id + count
pub const REGISTER_PREFIX_LEN: usize = INTERFACE_COUNT_OFFSET + 1;

/// One interface record: type (1) + MAC (6) + IPv4 (4)
pub const INTERFACE_RECORD_LEN: usize = 11;

pub const HARDWARE_ADDR_LEN: usize = 6;

/// The count is a single byte
pub const MAX_INTERFACES: usize = u8::MAX as usize;

// =============================================================================
// Settings
// =============================================================================

/// Option record header: code (1) + little-endian u32 length (4)
pub const OPTION_HEADER_LEN: usize = 5;

// =============================================================================
// Network
// =============================================================================

/// Default UDP port for controller/agent traffic
pub const DEFAULT_UDP_PORT: u16 = 9300;

/// Default bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// UDP receive buffer size (largest datagram accepted)
pub const UDP_BUFFER_SIZE: usize = 65_536;

/// Channel capacity for async message passing
pub const CHANNEL_CAPACITY: usize = 256;

/// Shutdown flag polling interval for transport tasks (milliseconds)
pub const SHUTDOWN_POLL_MS: u64 = 100;

// =============================================================================
// Retry
// =============================================================================

/// Maximum socket bind retry attempts
pub const MAX_SOCKET_RETRY_ATTEMPTS: u32 = 5;

/// Base delay between retry attempts (milliseconds)
pub const RETRY_BASE_DELAY_MS: u64 = 200;
