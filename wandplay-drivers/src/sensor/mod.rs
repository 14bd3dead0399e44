//! Sensor implementations

pub mod pir;

pub use pir::PirSensor;
