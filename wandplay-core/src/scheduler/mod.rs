//! Timer scheduling
//!
//! A fixed-capacity registry of periodic and one-shot jobs, plus the
//! single-slot wrapper the play controller and debouncer hold their timers in.

pub mod registry;
pub mod slot;

pub use registry::{Fired, SchedulerError, TimerHandle, TimerRegistry};
pub use slot::TimerSlot;
