//! Events that trigger play state transitions

/// Events that can trigger play state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayEvent {
    /// A pattern timer was installed for the selected mode
    Start,
    /// Play was switched off, or started with no pattern selected
    Stop,
    /// The motion mode was changed
    ModeChanged,
    /// Engage-on-motion was switched off
    EngagementDisabled,
}

impl PlayEvent {
    /// Check if this event always ends a play session
    pub fn ends_session(&self) -> bool {
        !matches!(self, PlayEvent::Start)
    }
}
