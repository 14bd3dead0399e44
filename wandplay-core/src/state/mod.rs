//! State machine for play sessions
//!
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::PlayEvent;
pub use machine::PlayState;
