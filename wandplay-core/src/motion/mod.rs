//! Wand motion
//!
//! Position values, the actuator that writes them to the servo, and the
//! pattern generators that pick the next one.

pub mod actuator;
pub mod patterns;
pub mod position;

pub use actuator::PositionActuator;
pub use patterns::{MotionMode, PatternBank, PatternGenerator, RandomWiggle, SlowRoll, Tease};
pub use position::*;
