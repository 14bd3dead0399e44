//! Main controller task
//!
//! Sole owner of the wand engine. Waits for a remote command, a sensor
//! edge, or the next timer deadline, handles it, runs whatever jobs are
//! due, and mirrors the play state on the status LED.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::{Instant, Timer};
use portable_atomic::Ordering;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use wandplay_core::config::WandConfig;
use wandplay_core::engine::WandEngine;
use wandplay_core::traits::{MotionSensor, TelemetrySink};
use wandplay_drivers::indicator::StatusLed;
use wandplay_drivers::servo::PwmServo;
use wandplay_hal_rp2040::{RpOutput, RpPwm};
use wandplay_protocol::{DeviceMessage, Telemetry};

use crate::channels::{COMMAND_CHANNEL, MOTION_EDGE, MOTION_LEVEL, OUTBOUND_CHANNEL};

pub type WandServo = PwmServo<RpPwm<'static>>;
pub type WandLed = StatusLed<RpOutput<'static>>;

/// Publishes onto the outbound link channel, dropping when it is full
struct LinkSink;

impl TelemetrySink for LinkSink {
    fn publish(&mut self, value: Telemetry) {
        trace!("Publish {:?}", value);
        if let Err(e) = OUTBOUND_CHANNEL.try_send(DeviceMessage::Telemetry(value)) {
            let embassy_sync::channel::TrySendError::Full(msg) = e;
            warn!("Outbound channel full, dropping {:?}", msg);
        }
    }
}

/// Reads the level latched by the motion sensor task
struct LatchedMotion;

impl MotionSensor for LatchedMotion {
    fn motion_present(&mut self) -> bool {
        MOTION_LEVEL.load(Ordering::Relaxed)
    }
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: WandConfig, servo: WandServo, mut led: WandLed, seed: u64) {
    info!("Controller task started");

    let mut engine = WandEngine::new(config, servo, SmallRng::seed_from_u64(seed));
    let mut sink = LinkSink;
    let mut sensor = LatchedMotion;

    engine.boot(&mut sink);
    info!("Wand at start position {}", engine.position().value());

    loop {
        let deadline = engine.next_deadline();

        match select3(
            COMMAND_CHANNEL.receive(),
            MOTION_EDGE.wait(),
            wait_for_deadline(deadline),
        )
        .await
        {
            Either3::First(cmd) => {
                info!("Command: {:?}", cmd);
                match engine.handle_command(cmd, now_ms(), &mut sink) {
                    Ok(state) => debug!("Play state: {:?}", state),
                    Err(e) => error!("Command {:?} failed: {:?}", cmd, e),
                }
            }
            Either3::Second(at) => {
                match engine.motion_edge(at.as_millis()) {
                    Ok(handle) => trace!("Motion sample armed as timer {}", handle.id()),
                    Err(e) => error!("Failed to schedule motion sample: {:?}", e),
                }
            }
            Either3::Third(()) => {}
        }

        let before = engine.state();
        match engine.poll(now_ms(), &mut sensor, &mut sink) {
            Ok(0) => {}
            Ok(n) => trace!("Ran {} timer jobs", n),
            Err(e) => error!("Timer job failed: {:?}", e),
        }
        if engine.state() != before {
            info!("Motion decision: {:?} -> {:?}", before, engine.state());
        }

        if led.is_on() != engine.is_playing() {
            led.set(engine.is_playing());
        }
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

async fn wait_for_deadline(deadline: Option<u64>) {
    match deadline {
        Some(ms) => Timer::at(Instant::from_millis(ms)).await,
        None => core::future::pending().await,
    }
}
