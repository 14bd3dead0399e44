//! Hardware abstraction traits
//!
//! These traits define the interface between the play engine and the
//! hardware-specific implementations in `wandplay-drivers` and the firmware.

pub mod sensor;
pub mod servo;
pub mod telemetry;

pub use sensor::MotionSensor;
pub use servo::ServoDriver;
pub use telemetry::TelemetrySink;
