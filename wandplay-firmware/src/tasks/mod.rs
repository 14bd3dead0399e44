//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod link_rx;
pub mod link_tx;
pub mod motion_sensor;
pub mod stats;

pub use controller::{controller_task, WandLed, WandServo};
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
pub use motion_sensor::{motion_sensor_task, WandPir};
pub use stats::stats_task;
