//! Link UART receive task
//!
//! Receives frames from the dashboard/voice bridge and routes them: remote
//! commands go to the controller, pings are answered here.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use wandplay_protocol::{DeviceMessage, FrameParser, LinkCommand, VoiceCommand};

use crate::channels::{COMMAND_CHANNEL, OUTBOUND_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the bridge
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match LinkCommand::from_frame(&frame) {
                            Ok(cmd) => handle_link_command(cmd),
                            Err(e) => {
                                warn!("Failed to decode link frame: {:?}", e);
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

fn handle_link_command(cmd: LinkCommand) {
    match cmd {
        LinkCommand::Ping => {
            trace!("PING received");
            if OUTBOUND_CHANNEL.try_send(DeviceMessage::Pong).is_err() {
                warn!("Outbound channel full, dropping PONG");
            }
        }
        LinkCommand::Voice(voice) => {
            let VoiceCommand::SetState(on) = voice;
            info!("Voice assistant: play {}", on);
            forward(voice.into_remote());
        }
        LinkCommand::Remote(remote) => forward(remote),
    }
}

fn forward(cmd: wandplay_protocol::RemoteCommand) {
    if COMMAND_CHANNEL.try_send(cmd).is_err() {
        warn!("Command channel full, dropping {:?}", cmd);
    }
}
