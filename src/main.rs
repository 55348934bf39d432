//! NPMP command-line tool
//!
//! Usage:
//!   npmp demo                 Print one of each message and its bytes
//!   npmp decode <HEX>         Decode a hex-encoded message
//!   npmp listen [--port N]    Print messages arriving on a UDP port

use clap::Parser;
use npmp::cli::{sample_messages, Cli, Command};
use npmp::codec::DatagramCodec;
use npmp::config::{self, Config};
use npmp::endpoint::Endpoint;
use npmp::error::{Error, Result};
use npmp::protocol::{Decoder, Message, MessageType};
use npmp::transport::{Transport, UdpTransport};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    npmp::logging::init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };

    match cli.command {
        Command::Demo => run_demo(&config),
        Command::Decode { hex } => run_decode(&config, &hex),
        Command::Listen { port, ack } => {
            let rt = tokio::runtime::Runtime::new().map_err(|e| Error::Runtime { source: e })?;
            rt.block_on(run_listen(config, port, ack))
        }
    }
}

fn run_demo(config: &Config) -> Result<()> {
    println!("Network Performance Measurement Protocol");
    for message in sample_messages(&config.protocol)? {
        print_message(&message);
    }
    Ok(())
}

fn run_decode(config: &Config, input: &str) -> Result<()> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = hex::decode(cleaned).map_err(|e| Error::HexInput { source: e })?;
    let message = Decoder::from_config(&config.protocol).parse(&bytes)?;
    println!("{:#?}", message);
    Ok(())
}

async fn run_listen(config: Config, port: Option<u16>, ack: bool) -> Result<()> {
    let mut network = config.network.clone();
    if let Some(port) = port {
        network.port = port;
    }
    let addr = network.socket_addr()?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        shutdown_signal.store(true, Ordering::SeqCst);
    });

    let channels = UdpTransport::new(addr).spawn(shutdown.clone())?;
    let codec = DatagramCodec::new(Decoder::from_config(&config.protocol));
    let mut endpoint = Endpoint::new(channels, codec);
    info!("Listening on {}", endpoint.local_addr());
    eprintln!("Listening on {} (Ctrl+C to stop)", endpoint.local_addr());

    let ack_message = Message::with_header(config.protocol.header(MessageType::Ack));
    while let Some(received) = endpoint.recv().await {
        println!("from {}:", received.peer);
        print_message(&received.message);
        if ack {
            endpoint.send(received.peer, &ack_message).await?;
        }
    }

    let stats = endpoint.stats().snapshot();
    eprintln!(
        "Stopped: {} received, {} rejected, {} sent",
        stats.rx_messages, stats.rejected, stats.tx_messages
    );
    Ok(())
}

fn print_message(message: &Message) {
    println!("{:?}", message);
    println!("  {}", hex::encode(message.encode()));
}
