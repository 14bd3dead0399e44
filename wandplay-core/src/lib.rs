//! Board-agnostic play engine for the cat wand firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo, motion sensor, telemetry sink)
//! - Cooperative timer registry with single-slot replace semantics
//! - Play state machine and play-mode controller
//! - Pattern generators and the position actuator
//! - Motion debouncing and the engagement policy
//! - Configuration types and the `wand.toml` parser
//!
//! [`engine::WandEngine`] ties these together into the single execution
//! context that the firmware drives.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod motion;
pub mod play;
pub mod scheduler;
pub mod sensor;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
