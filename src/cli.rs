//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation,
//! plus the sample messages printed by `npmp demo`.

use crate::config::ProtocolConfig;
use crate::protocol::{
    DataMessage, DataType, InformMessage, JobMessage, Message, MessageType, NakCode, NakMessage,
    NetInterface, NetType, OptionCode, OptionEntry, RegisterMessage, Result, SettingsMessage,
};
use clap::{Parser, Subcommand};
use std::net::Ipv4Addr;
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Network Performance Measurement Protocol tool
#[derive(Parser, Debug)]
#[command(name = "npmp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./npmp.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print sample messages and their wire bytes
    Demo,

    /// Decode one hex-encoded message and print it
    Decode {
        /// Message bytes as hex (e.g. 0050400a)
        #[arg(value_name = "HEX")]
        hex: String,
    },

    /// Listen for messages and print them
    Listen {
        /// UDP port (overrides config)
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,

        /// Answer every valid message with an ACK
        #[arg(long)]
        ack: bool,
    },
}

// =============================================================================
// Demo messages
// =============================================================================

/// One of each message kind with representative field values, carrying the
/// configured version and cookie
pub fn sample_messages(protocol: &ProtocolConfig) -> Result<Vec<Message>> {
    let mut register = RegisterMessage::new();
    register.set_client_id([
        99, 226, 170, 251, 37, 41, 43, 236, 249, 80, 159, 109, 149, 85, 244, 19,
    ]);
    register.add_interface(NetInterface::new(
        NetType::WirelessEthernet,
        [0xab, 0xcd, 0xef, 0x12, 0x34, 0x56],
        Ipv4Addr::new(192, 168, 0, 1),
    ))?;

    let mut start = JobMessage::start();
    start.set_job_id([250, 67, 39, 62]);
    let mut end = JobMessage::end();
    end.set_job_id([250, 67, 39, 62]);

    let mut data = DataMessage::new();
    data.set_job_id([250, 67, 39, 62]);
    data.set_data_type(DataType::Ping);
    data.set_data(&b"The cow jumped over the moon"[..]);

    let mut inform = InformMessage::new();
    inform.set_option(OptionCode::ProtocolVersion);
    inform.set_options([OptionCode::HeartbeatDuration, OptionCode::JobSpec]);

    let mut nak = NakMessage::new();
    nak.set_response_code(NakCode::UnsupportedVersion);

    let mut settings = SettingsMessage::new();
    settings.add_option(OptionEntry::new(
        OptionCode::ClientSoftwareRepo,
        &b"http://repo.example.com/client/latest"[..],
    ))?;

    let mut messages: Vec<Message> = vec![
        register.into(),
        Message::new(MessageType::Disconnect),
        start.into(),
        end.into(),
        data.into(),
        inform.into(),
        Message::new(MessageType::Version),
        Message::new(MessageType::Ack),
        nak.into(),
        settings.into(),
    ];
    for message in &mut messages {
        message.set_version(protocol.version);
        message.set_cookie(&protocol.cookie())?;
    }
    Ok(messages)
}

// =============================================================================
// Tests
// =============================================================================
