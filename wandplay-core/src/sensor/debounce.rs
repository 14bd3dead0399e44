//! Motion edge debouncing
//!
//! Every edge on the sensor line re-arms a single one-shot timer. Only the
//! last edge of a burst survives, and the sensor level is read once when
//! that timer fires.

use crate::play::TimerJob;
use crate::scheduler::{SchedulerError, TimerHandle, TimerRegistry, TimerSlot};
use crate::traits::MotionSensor;

/// Debounced sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionSample {
    pub sensed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MotionDebouncer {
    delay_ms: u32,
    pending: TimerSlot,
}

impl MotionDebouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: TimerSlot::new(),
        }
    }

    /// Record an edge, replacing any sample that is still pending
    pub fn edge<const N: usize>(
        &mut self,
        timers: &mut TimerRegistry<TimerJob, N>,
        now_ms: u64,
    ) -> Result<TimerHandle, SchedulerError> {
        let delay = self.delay_ms;
        self.pending
            .replace(timers, |t| t.set_timeout(now_ms, delay, TimerJob::MotionSample))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_armed()
    }

    /// Read the sensor for a fired sample timer
    ///
    /// Returns None if `fired` is not the pending sample.
    pub fn sample<S: MotionSensor>(
        &mut self,
        fired: TimerHandle,
        sensor: &mut S,
    ) -> Option<MotionSample> {
        if !self.pending.release(fired) {
            return None;
        }
        Some(MotionSample {
            sensed: sensor.motion_present(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedSensor;

    type Timers = TimerRegistry<TimerJob, 4>;

    #[test]
    fn test_burst_collapses_to_one_sample() {
        let mut timers = Timers::new();
        let mut debouncer = MotionDebouncer::new(50);

        for now in [0, 10, 20, 30] {
            debouncer.edge(&mut timers, now).unwrap();
        }

        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(80));
    }

    #[test]
    fn test_sample_reads_level_once() {
        let mut timers = Timers::new();
        let mut debouncer = MotionDebouncer::new(50);
        let mut sensor = FixedSensor {
            present: true,
            ..Default::default()
        };

        debouncer.edge(&mut timers, 0).unwrap();
        let fired = timers.pop_due(50).unwrap();

        assert_eq!(
            debouncer.sample(fired.handle, &mut sensor),
            Some(MotionSample { sensed: true })
        );
        assert_eq!(sensor.reads, 1);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.sample(fired.handle, &mut sensor), None);
        assert_eq!(sensor.reads, 1);
    }
}
