//! Play state machine
//!
//! Whether a pattern is running is a function of the current state and
//! an event. The controller keeps the timer slot consistent with it.

use super::events::PlayEvent;

/// Play states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayState {
    /// No pattern timer installed
    #[default]
    Stopped,
    /// Exactly one pattern timer is driving the wand
    Playing,
}

impl PlayState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlayState::Playing)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: PlayEvent) -> Self {
        use PlayEvent::*;
        use PlayState::*;

        match (self, event) {
            // Starting again while playing restarts the same session
            (Stopped, Start) | (Playing, Start) => Playing,

            (Playing, Stop) => Stopped,
            (Playing, ModeChanged) => Stopped,
            (Playing, EngagementDisabled) => Stopped,

            // Default: stay in current state
            _ => self,
        }
    }
}
