//! One-byte enumerations used on the wire

use super::error::ProtocolError;

/// Message type tag at offset 3 of every message
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Null = 0,
    Register = 1,
    Disconnect = 2,
    Start = 3,
    End = 4,
    Data = 5,
    Inform = 6,
    Version = 7,
    Ack = 8,
    Nak = 9,
    Settings = 10,
}

impl MessageType {
    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Null),
            1 => Some(Self::Register),
            2 => Some(Self::Disconnect),
            3 => Some(Self::Start),
            4 => Some(Self::End),
            5 => Some(Self::Data),
            6 => Some(Self::Inform),
            7 => Some(Self::Version),
            8 => Some(Self::Ack),
            9 => Some(Self::Nak),
            10 => Some(Self::Settings),
            _ => None,
        }
    }
}

impl TryFrom<u8> for MessageType {
    type Error = ProtocolError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::from_u8(v).ok_or(ProtocolError::UnknownType(v))
    }
}

/// Option code shared by Inform (bare code list) and Settings (code + value)
///
/// Bytes outside the known set are kept as `Unknown` so an Inform list
/// survives decode unchanged; callers treat them as unrecognized options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCode {
    Pad,
    ServerIp,
    IperfServerAddress,
    IperfServerPort,
    IperfServerVersion,
    JobResourceDeadline,
    ProtocolVersion,
    ClientSoftwareVersion,
    ClientSoftwareRepo,
    JobSpec,
    VendorOptions,
    HeartbeatDuration,
    OpEnd,
    Unknown(u8),
}

impl OptionCode {
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<u8> for OptionCode {
    fn from(v: u8) -> Self {
        match v {
            0 => Self::Pad,
            1 => Self::ServerIp,
            2 => Self::IperfServerAddress,
            3 => Self::IperfServerPort,
            4 => Self::IperfServerVersion,
            5 => Self::JobResourceDeadline,
            6 => Self::ProtocolVersion,
            7 => Self::ClientSoftwareVersion,
            8 => Self::ClientSoftwareRepo,
            9 => Self::JobSpec,
            10 => Self::VendorOptions,
            11 => Self::HeartbeatDuration,
            255 => Self::OpEnd,
            other => Self::Unknown(other),
        }
    }
}

impl From<OptionCode> for u8 {
    fn from(code: OptionCode) -> Self {
        match code {
            OptionCode::Pad => 0,
            OptionCode::ServerIp => 1,
            OptionCode::IperfServerAddress => 2,
            OptionCode::IperfServerPort => 3,
            OptionCode::IperfServerVersion => 4,
            OptionCode::JobResourceDeadline => 5,
            OptionCode::ProtocolVersion => 6,
            OptionCode::ClientSoftwareVersion => 7,
            OptionCode::ClientSoftwareRepo => 8,
            OptionCode::JobSpec => 9,
            OptionCode::VendorOptions => 10,
            OptionCode::HeartbeatDuration => 11,
            OptionCode::OpEnd => 255,
            OptionCode::Unknown(v) => v,
        }
    }
}

/// One-byte field with a fixed set of known values
///
/// Any other byte decodes to `Unknown` and encodes back unchanged.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[default]
            $default:ident = $default_value:literal,
            $($variant:ident = $value:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $default,
            $($variant,)*
            Unknown(u8),
        }

        impl $name {
            pub fn is_known(self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl From<u8> for $name {
            fn from(v: u8) -> Self {
                match v {
                    $default_value => Self::$default,
                    $($value => Self::$variant,)*
                    other => Self::Unknown(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(v: $name) -> Self {
                match v {
                    $name::$default => $default_value,
                    $($name::$variant => $value,)*
                    $name::Unknown(other) => other,
                }
            }
        }
    };
}

wire_enum! {
    /// Measurement kind carried by a Data message
    pub enum DataType {
        #[default]
        Ping = 0,
        Iperf2 = 1,
        Iperf3 = 2,
    }
}

wire_enum! {
    /// Link type of a registered interface
    pub enum NetType {
        #[default]
        WiredEthernet = 0,
        WirelessEthernet = 1,
    }
}

wire_enum! {
    /// Reason carried by a NAK message
    pub enum NakCode {
        #[default]
        GeneralError = 0,
        NotAuthorized = 1,
        UnsupportedVersion = 2,
        NoPortsAvailable = 3,
        InvalidData = 4,
    }
}
