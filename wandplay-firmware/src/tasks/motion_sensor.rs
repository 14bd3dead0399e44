//! Motion sensor edge task
//!
//! Waits for edges on the PIR line, latches the level, and hands the edge
//! time to the controller, which owns debouncing.

use defmt::*;
use embassy_time::Instant;
use portable_atomic::Ordering;

use wandplay_core::traits::MotionSensor;
use wandplay_drivers::sensor::PirSensor;
use wandplay_hal_rp2040::RpInput;

use crate::channels::{MOTION_EDGE, MOTION_LEVEL};

pub type WandPir = PirSensor<RpInput<'static>>;

/// Motion sensor task - forwards every edge on the PIR output
#[embassy_executor::task]
pub async fn motion_sensor_task(mut pir: WandPir) {
    info!("Motion sensor task started");

    MOTION_LEVEL.store(pir.motion_present(), Ordering::Relaxed);

    loop {
        pir.pin_mut().wait_for_any_edge().await;

        let level = pir.motion_present();
        MOTION_LEVEL.store(level, Ordering::Relaxed);
        MOTION_EDGE.signal(Instant::now());
        debug!("Motion edge, level={}", level);
    }
}
