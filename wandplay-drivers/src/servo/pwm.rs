//! Servo on a PWM channel
//!
//! Device units are a fraction of the PWM frame: a value of `duty_range`
//! holds the output high for the whole frame. The stock wand uses a range
//! of 1023 at 50 Hz, so its limits of 55..=180 are pulses of roughly
//! 1.1 ms to 3.5 ms.

use wandplay_core::config::ServoConfig;
use wandplay_core::traits::ServoDriver;
use wandplay_hal::PwmChannel;

pub struct PwmServo<P> {
    channel: P,
    duty_range: u16,
    /// Last value applied
    value: Option<i16>,
}

impl<P: PwmChannel> PwmServo<P> {
    /// Create a servo driver; the output stays idle until the first `apply`
    pub fn new(channel: P, config: &ServoConfig) -> Self {
        Self {
            channel,
            duty_range: config.duty_range.max(1),
            value: None,
        }
    }

    pub fn value(&self) -> Option<i16> {
        self.value
    }
}

impl<P: PwmChannel> ServoDriver for PwmServo<P> {
    /// Negative positions give 0% duty
    fn apply(&mut self, value: i16) {
        self.channel.set_duty_fraction(value.max(0) as u32, u32::from(self.duty_range));
        self.value = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock PWM channel for testing
    struct MockPwm {
        top: u16,
        compare: u16,
    }

    impl PwmChannel for MockPwm {
        fn max_compare(&self) -> u16 {
            self.top
        }

        fn set_compare(&mut self, compare: u16) {
            self.compare = compare;
        }
    }

    fn servo() -> PwmServo<MockPwm> {
        let pwm = MockPwm {
            top: 24_999,
            compare: 0,
        };
        PwmServo::new(pwm, &ServoConfig::default())
    }

    #[test]
    fn test_idle_until_applied() {
        let servo = servo();
        assert_eq!(servo.value(), None);
        assert_eq!(servo.channel.compare, 0);
    }

    #[test]
    fn test_apply_scales_to_frame() {
        let mut servo = servo();

        servo.apply(1023);
        assert_eq!(servo.channel.compare, 24_999);

        servo.apply(150);
        // 150 / 1023 of a 25000-count frame
        assert_eq!(servo.channel.compare, 3_665);
        assert_eq!(servo.value(), Some(150));
    }

    #[test]
    fn test_out_of_range_saturates() {
        let mut servo = servo();

        servo.apply(-20);
        assert_eq!(servo.channel.compare, 0);

        servo.apply(5000);
        assert_eq!(servo.channel.compare, 24_999);
    }
}
