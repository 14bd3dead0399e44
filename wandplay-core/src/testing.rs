//! Host test doubles for the hardware traits

use heapless::Vec;
use wandplay_protocol::Telemetry;

use crate::traits::{MotionSensor, ServoDriver, TelemetrySink};

#[derive(Debug, Default)]
pub struct FakeServo {
    pub applied: Vec<i16, 256>,
}

impl ServoDriver for FakeServo {
    fn apply(&mut self, value: i16) {
        // Tests that run long sequences only look at the tail
        if self.applied.is_full() {
            self.applied.remove(0);
        }
        let _ = self.applied.push(value);
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<Telemetry, 64>,
}

impl RecordingSink {
    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl TelemetrySink for RecordingSink {
    fn publish(&mut self, value: Telemetry) {
        if self.sent.is_full() {
            self.sent.remove(0);
        }
        let _ = self.sent.push(value);
    }
}

#[derive(Debug, Default)]
pub struct FixedSensor {
    pub present: bool,
    pub reads: u32,
}

impl MotionSensor for FixedSensor {
    fn motion_present(&mut self) -> bool {
        self.reads += 1;
        self.present
    }
}
