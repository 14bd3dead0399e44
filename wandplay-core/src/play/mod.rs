//! Play sessions
//!
//! The controller owns the session flags and the single pattern timer.

pub mod controller;

pub use controller::{PlayController, PlaySession};

use crate::motion::MotionMode;

/// Work items the engine schedules on its timer registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerJob {
    /// One pattern tick for the given mode
    Pattern(MotionMode),
    /// Read the motion sensor after the debounce delay
    MotionSample,
}
