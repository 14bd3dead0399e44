//! Passive infrared motion sensor
//!
//! Most PIR modules drive their output high while they see motion. Some
//! boards put an inverting buffer in between; `active_low` covers those.

use wandplay_core::traits::MotionSensor;
use wandplay_hal::InputPin;

pub struct PirSensor<I> {
    pin: I,
    /// If true, motion = pin LOW
    active_low: bool,
}

impl<I: InputPin> PirSensor<I> {
    pub fn new(pin: I, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn new_active_high(pin: I) -> Self {
        Self::new(pin, false)
    }

    /// Access the pin, e.g. to wait for edges on it
    pub fn pin_mut(&mut self) -> &mut I {
        &mut self.pin
    }
}

impl<I: InputPin> MotionSensor for PirSensor<I> {
    fn motion_present(&mut self) -> bool {
        self.pin.is_high() != self.active_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high() {
        let mut pir = PirSensor::new_active_high(MockPin { high: true });
        assert!(pir.motion_present());

        pir.pin_mut().high = false;
        assert!(!pir.motion_present());
    }

    #[test]
    fn test_active_low() {
        let mut pir = PirSensor::new(MockPin { high: false }, true);
        assert!(pir.motion_present());

        pir.pin_mut().high = true;
        assert!(!pir.motion_present());
    }
}
