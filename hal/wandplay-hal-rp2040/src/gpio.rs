//! GPIO wrappers
//!
//! Thin newtypes so embassy-rp pins can be handed to the drivers through
//! the `wandplay-hal` traits while keeping async edge waiting available.

use embassy_rp::gpio::{Input, Output};

pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Wait for the next rising or falling edge
    pub async fn wait_for_any_edge(&mut self) {
        self.pin.wait_for_any_edge().await;
    }
}

impl wandplay_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl wandplay_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
