//! Link UART transmit task
//!
//! Drains the outbound channel onto the wire, one frame per message.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use wandplay_protocol::frame::MAX_FRAME_SIZE;

use crate::channels::OUTBOUND_CHANNEL;

/// Link TX task - sends telemetry, notifications, and pongs to the bridge
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut buf = [0u8; MAX_FRAME_SIZE];

    loop {
        let msg = OUTBOUND_CHANNEL.receive().await;

        let frame = match msg.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to build frame for {:?}: {:?}", msg, e);
                continue;
            }
        };

        match frame.encode(&mut buf) {
            Ok(len) => {
                if let Err(e) = tx.write_all(&buf[..len]).await {
                    warn!("UART write error: {:?}", e);
                } else {
                    trace!("TX: {} bytes", len);
                }
            }
            Err(e) => {
                warn!("Failed to encode frame: {:?}", e);
            }
        }
    }
}
