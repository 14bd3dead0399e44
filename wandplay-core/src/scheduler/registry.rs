//! Cooperative timer registry
//!
//! Holds periodic and one-shot jobs keyed by an opaque handle. Nothing here
//! runs on its own: the owner asks for the next deadline, sleeps until it,
//! and then drains due jobs with [`TimerRegistry::pop_due`]. Every job runs
//! to completion in the owner's context before the next one is popped.

use heapless::Vec;

/// Opaque handle for an installed timer
///
/// Handles are allocated from a counter and are not reused while the
/// registry is alive, so cancelling a stale handle is always a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// All timer slots are in use
    Full,
}

/// A job that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fired<J> {
    pub handle: TimerHandle,
    pub job: J,
    /// Periodic jobs stay registered after firing
    pub periodic: bool,
}

#[derive(Debug, Clone, Copy)]
struct Entry<J> {
    handle: TimerHandle,
    due_ms: u64,
    period_ms: Option<u32>,
    job: J,
}

/// Fixed-capacity registry of pending jobs
#[derive(Debug)]
pub struct TimerRegistry<J, const N: usize> {
    entries: Vec<Entry<J>, N>,
    next_id: u32,
}

impl<J: Copy, const N: usize> Default for TimerRegistry<J, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<J: Copy, const N: usize> TimerRegistry<J, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Install a job that fires every `period_ms`, first at `now_ms + period_ms`
    ///
    /// A zero period is treated as 1 ms.
    pub fn set_interval(
        &mut self,
        now_ms: u64,
        period_ms: u32,
        job: J,
    ) -> Result<TimerHandle, SchedulerError> {
        let period_ms = period_ms.max(1);
        self.insert(now_ms + u64::from(period_ms), Some(period_ms), job)
    }

    /// Install a job that fires once at `now_ms + delay_ms`
    pub fn set_timeout(
        &mut self,
        now_ms: u64,
        delay_ms: u32,
        job: J,
    ) -> Result<TimerHandle, SchedulerError> {
        self.insert(now_ms + u64::from(delay_ms), None, job)
    }

    fn insert(
        &mut self,
        due_ms: u64,
        period_ms: Option<u32>,
        job: J,
    ) -> Result<TimerHandle, SchedulerError> {
        let handle = self.allocate_handle();
        self.entries
            .push(Entry {
                handle,
                due_ms,
                period_ms,
                job,
            })
            .map_err(|_| SchedulerError::Full)?;
        Ok(handle)
    }

    fn allocate_handle(&mut self) -> TimerHandle {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        TimerHandle(id)
    }

    /// Remove a timer
    ///
    /// Returns false if the handle was not active (already fired, already
    /// cancelled, or never issued).
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(index) => {
                self.entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Period of an active interval, None for timeouts and unknown handles
    pub fn period_of(&self, handle: TimerHandle) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .and_then(|e| e.period_ms)
    }

    /// Job of an active timer
    pub fn job_of(&self, handle: TimerHandle) -> Option<J> {
        self.entries
            .iter()
            .find(|e| e.handle == handle)
            .map(|e| e.job)
    }

    /// Number of active timers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count active timers whose job matches `predicate`
    pub fn count_matching(&self, predicate: impl Fn(&J) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.job)).count()
    }

    /// Earliest due time across all active timers
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Take the earliest job due at or before `now_ms`
    ///
    /// Timeouts are removed. Intervals are rescheduled one period later; an
    /// interval that has fallen more than a period behind skips the missed
    /// ticks instead of firing in a burst.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired<J>> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| e.due_ms)
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[index];
        let fired = Fired {
            handle: entry.handle,
            job: entry.job,
            periodic: entry.period_ms.is_some(),
        };

        if let Some(period) = entry.period_ms {
            let period = u64::from(period);
            entry.due_ms += period;
            if entry.due_ms <= now_ms {
                entry.due_ms = now_ms + period;
            }
        } else {
            self.entries.swap_remove(index);
        }

        Some(fired)
    }
}
