//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in `wandplay-core`,
//! written against the `wandplay-hal` pin and PWM traits:
//!
//! - Servo output on a PWM channel
//! - PIR motion sensor on a GPIO input
//! - Status LED on a GPIO output

#![no_std]
#![deny(unsafe_code)]

pub mod indicator;
pub mod sensor;
pub mod servo;
