//! Engagement policy
//!
//! Maps a debounced sample to a play decision. With engagement off the
//! sensor is only reported, never acted on.

/// Push notification sent when motion starts play
pub const MOTION_ALERT: &str = "😼 Motion sensed, playing with cat!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngagementCommand {
    StartPlay,
    StopPlay,
}

impl EngagementCommand {
    pub fn playing(&self) -> bool {
        matches!(self, EngagementCommand::StartPlay)
    }

    /// Text to push to the remote user, if any
    pub fn notification(&self) -> Option<&'static str> {
        match self {
            EngagementCommand::StartPlay => Some(MOTION_ALERT),
            EngagementCommand::StopPlay => None,
        }
    }
}

pub fn decide(engage_on_motion: bool, sensed: bool) -> Option<EngagementCommand> {
    match (engage_on_motion, sensed) {
        (false, _) => None,
        (true, true) => Some(EngagementCommand::StartPlay),
        (true, false) => Some(EngagementCommand::StopPlay),
    }
}
