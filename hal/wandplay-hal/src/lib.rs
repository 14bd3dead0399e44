//! Wandplay Hardware Abstraction Layer
//!
//! Traits the drivers are written against, implemented by chip-specific
//! HALs. Only the RP2040 is supported today.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  wandplay-drivers (servo, PIR, LED)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wandplay-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  wandplay-hal-rp2040                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`pwm::PwmChannel`] - One PWM output channel

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;

pub use gpio::{InputPin, OutputPin};
pub use pwm::PwmChannel;
