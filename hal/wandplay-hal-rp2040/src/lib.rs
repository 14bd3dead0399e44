//! RP2040-specific HAL for the wand firmware
//!
//! Implements the shared `wandplay-hal` traits on top of `embassy-rp`:
//!
//! - GPIO input and output wrappers
//! - PWM slice setup for hobby servos

#![no_std]

pub mod gpio;
pub mod pwm;

pub use gpio::{RpInput, RpOutput};
pub use pwm::{servo_pwm_config, PwmError, RpPwm, SERVO_PWM_TOP};

// Re-export shared traits from wandplay-hal for convenience
pub use wandplay_hal::{InputPin, OutputPin, PwmChannel};
