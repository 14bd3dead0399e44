//! Position actuator
//!
//! The only path by which the wand moves. Every accepted position is
//! applied to the servo, stored, and published, in that order.

use wandplay_protocol::Telemetry;

use super::position::WandPosition;
use crate::traits::{ServoDriver, TelemetrySink};

pub struct PositionActuator<S: ServoDriver> {
    servo: S,
    position: WandPosition,
}

impl<S: ServoDriver> PositionActuator<S> {
    /// Wrap a servo; `initial` is recorded but not applied
    pub fn new(servo: S, initial: i16) -> Self {
        Self {
            servo,
            position: WandPosition::new(initial),
        }
    }

    pub fn position(&self) -> WandPosition {
        self.position
    }

    /// Move the wand and report the new position
    pub fn set_position<T: TelemetrySink>(&mut self, value: i16, sink: &mut T) {
        self.servo.apply(value);
        self.position = WandPosition::new(value);
        sink.publish(Telemetry::WandPosition(value));
    }

    pub fn servo(&self) -> &S {
        &self.servo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeServo, RecordingSink};

    #[test]
    fn test_apply_store_publish() {
        let mut actuator = PositionActuator::new(FakeServo::default(), 150);
        let mut sink = RecordingSink::default();

        actuator.set_position(100, &mut sink);

        assert_eq!(actuator.position().value(), 100);
        assert_eq!(actuator.servo().applied.as_slice(), &[100]);
        assert_eq!(sink.sent.as_slice(), &[Telemetry::WandPosition(100)]);
    }

    #[test]
    fn test_initial_position_not_applied() {
        let actuator = PositionActuator::new(FakeServo::default(), 150);
        assert_eq!(actuator.position(), WandPosition::new(150));
        assert!(actuator.servo().applied.is_empty());
    }
}
