//! Motion sensing
//!
//! Edge debouncing and the rule that turns a sample into play.

pub mod debounce;
pub mod engagement;

pub use debounce::{MotionDebouncer, MotionSample};
pub use engagement::{decide, EngagementCommand, MOTION_ALERT};
