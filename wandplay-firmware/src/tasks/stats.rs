//! Uptime reporting task

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use wandplay_protocol::{DeviceMessage, Telemetry};

use crate::channels::OUTBOUND_CHANNEL;

/// Stats task - publishes uptime in seconds every `interval_ms`
#[embassy_executor::task]
pub async fn stats_task(interval_ms: u32) {
    info!("Stats task started");

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(interval_ms.max(1))));

    loop {
        ticker.next().await;

        let uptime_s = Instant::now().as_secs() as u32;
        let msg = DeviceMessage::Telemetry(Telemetry::UptimeS(uptime_s));
        if OUTBOUND_CHANNEL.try_send(msg).is_err() {
            trace!("Outbound channel full, skipping uptime report");
        }
    }
}
