//! Status LED
//!
//! Lit at boot to show the firmware is up, then follows the play state.

use wandplay_hal::OutputPin;

pub struct StatusLed<P> {
    pin: P,
    /// If true, LED on = pin LOW
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create the LED driver; the LED starts lit
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.set(true);
        led
    }

    pub fn set(&mut self, on: bool) {
        self.on = on;
        self.pin.set_state(on != self.inverted);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_lit_at_boot() {
        let led = StatusLed::new(MockPin { high: false }, false);
        assert!(led.is_on());
        assert!(led.pin.is_set_high());
    }

    #[test]
    fn test_inverted_led() {
        let mut led = StatusLed::new(MockPin { high: true }, true);
        assert!(!led.pin.is_set_high());

        led.set(false);
        assert!(!led.is_on());
        assert!(led.pin.is_set_high());
    }
}
