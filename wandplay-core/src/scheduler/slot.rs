//! Single-occupancy timer slot
//!
//! A slot remembers at most one timer. Installing into an occupied slot
//! cancels the previous timer first, so the owner can never leak a second
//! live timer for the same purpose.

use super::registry::{SchedulerError, TimerHandle, TimerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSlot {
    handle: Option<TimerHandle>,
}

impl TimerSlot {
    pub const fn new() -> Self {
        Self { handle: None }
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.handle
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel whatever the slot holds, then install a new timer
    ///
    /// On error the slot is left empty.
    pub fn replace<J, const N: usize, F>(
        &mut self,
        timers: &mut TimerRegistry<J, N>,
        install: F,
    ) -> Result<TimerHandle, SchedulerError>
    where
        J: Copy,
        F: FnOnce(&mut TimerRegistry<J, N>) -> Result<TimerHandle, SchedulerError>,
    {
        self.clear(timers);
        let handle = install(timers)?;
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Cancel the held timer, if any
    pub fn clear<J: Copy, const N: usize>(&mut self, timers: &mut TimerRegistry<J, N>) -> bool {
        match self.handle.take() {
            Some(handle) => timers.cancel(handle),
            None => false,
        }
    }

    /// Forget a one-shot timer that has just fired
    ///
    /// Returns false if `fired` is not the held timer (it was replaced
    /// before it came due).
    pub fn release(&mut self, fired: TimerHandle) -> bool {
        if self.handle == Some(fired) {
            self.handle = None;
            true
        } else {
            false
        }
    }
}
