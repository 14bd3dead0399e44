//! Play-mode controller
//!
//! Keeps three facts consistent: the `playing` flag, the play state, and
//! whether the session's timer slot holds a pattern timer. Every path that
//! starts play goes through [`PlayController::set_playing`], which cancels
//! whatever was running before installing a new timer, so at most one
//! pattern timer exists at any time.

use rand::RngCore;

use super::TimerJob;
use crate::config::{PlayPolicy, PlayTiming, WandLimits};
use crate::motion::{MotionMode, PatternBank};
use crate::scheduler::{SchedulerError, TimerHandle, TimerRegistry, TimerSlot};
use crate::state::{PlayEvent, PlayState};

/// User-visible session flags plus the pattern timer slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlaySession {
    /// Start playing automatically when motion is sensed
    pub engage_on_motion: bool,
    pub motion_mode: MotionMode,
    pub playing: bool,
    active_timer: TimerSlot,
}

impl PlaySession {
    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.active_timer.handle()
    }
}

#[derive(Debug)]
pub struct PlayController {
    session: PlaySession,
    state: PlayState,
    patterns: PatternBank,
    timing: PlayTiming,
    mode_change_stops_play: bool,
}

impl PlayController {
    pub fn new(timing: PlayTiming, policy: &PlayPolicy) -> Self {
        Self {
            session: PlaySession::default(),
            state: PlayState::Stopped,
            patterns: PatternBank::new(),
            timing,
            mode_change_stops_play: policy.mode_change_stops_play,
        }
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Select a pattern
    ///
    /// Any running pattern is stopped. If play was on and the policy keeps
    /// play across mode changes, the new pattern starts straight away.
    pub fn set_mode<const N: usize>(
        &mut self,
        mode: MotionMode,
        timers: &mut TimerRegistry<TimerJob, N>,
        now_ms: u64,
    ) -> Result<PlayState, SchedulerError> {
        let was_playing = self.session.playing;
        self.session.motion_mode = mode;
        self.stop(timers, PlayEvent::ModeChanged);

        if was_playing && !self.mode_change_stops_play {
            return self.set_playing(true, timers, now_ms);
        }
        Ok(self.state)
    }

    /// Turn play on or off
    ///
    /// Turning play on with no pattern selected leaves play off.
    pub fn set_playing<const N: usize>(
        &mut self,
        playing: bool,
        timers: &mut TimerRegistry<TimerJob, N>,
        now_ms: u64,
    ) -> Result<PlayState, SchedulerError> {
        let mode = self.session.motion_mode;
        let period = match mode.period_ms(&self.timing) {
            Some(period) if playing => period,
            _ => {
                self.stop(timers, PlayEvent::Stop);
                return Ok(self.state);
            }
        };

        let installed = self.session.active_timer.replace(timers, |t| {
            t.set_interval(now_ms, period, TimerJob::Pattern(mode))
        });

        match installed {
            Ok(_) => {
                self.session.playing = true;
                self.state = self.state.transition(PlayEvent::Start);
                Ok(self.state)
            }
            Err(e) => {
                self.stop(timers, PlayEvent::Stop);
                Err(e)
            }
        }
    }

    /// Switching engagement off also stops play
    pub fn set_engage_on_motion<const N: usize>(
        &mut self,
        engage: bool,
        timers: &mut TimerRegistry<TimerJob, N>,
    ) -> PlayState {
        self.session.engage_on_motion = engage;
        if !engage {
            self.stop(timers, PlayEvent::EngagementDisabled);
        }
        self.state
    }

    /// Next position for a pattern tick
    pub fn next_position<R: RngCore>(
        &mut self,
        mode: MotionMode,
        current: i16,
        limits: &WandLimits,
        rng: &mut R,
    ) -> Option<i16> {
        self.patterns.step(mode, current, limits, rng)
    }

    fn stop<const N: usize>(&mut self, timers: &mut TimerRegistry<TimerJob, N>, event: PlayEvent) {
        self.session.active_timer.clear(timers);
        self.session.playing = false;
        self.state = self.state.transition(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Timers = TimerRegistry<TimerJob, 4>;

    fn pattern_timers(timers: &Timers) -> usize {
        timers.count_matching(|job| matches!(job, TimerJob::Pattern(_)))
    }

    fn controller() -> PlayController {
        PlayController::new(PlayTiming::default(), &PlayPolicy::default())
    }

    #[test]
    fn test_play_installs_one_timer() {
        let mut timers = Timers::new();
        let mut ctl = controller();

        ctl.set_mode(MotionMode::Tease, &mut timers, 0).unwrap();
        let state = ctl.set_playing(true, &mut timers, 0).unwrap();

        assert_eq!(state, PlayState::Playing);
        assert!(ctl.session().playing);
        let handle = ctl.session().active_timer().unwrap();
        assert_eq!(timers.period_of(handle), Some(1000));
        assert_eq!(pattern_timers(&timers), 1);
    }

    #[test]
    fn test_repeated_play_does_not_stack() {
        let mut timers = Timers::new();
        let mut ctl = controller();

        ctl.set_mode(MotionMode::Wiggle, &mut timers, 0).unwrap();
        for now in 0..10 {
            ctl.set_playing(true, &mut timers, now).unwrap();
        }

        assert_eq!(pattern_timers(&timers), 1);
    }

    #[test]
    fn test_play_without_mode_stays_off() {
        let mut timers = Timers::new();
        let mut ctl = controller();

        let state = ctl.set_playing(true, &mut timers, 0).unwrap();

        assert_eq!(state, PlayState::Stopped);
        assert!(!ctl.session().playing);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_mode_change_stops_play() {
        let mut timers = Timers::new();
        let mut ctl = controller();

        ctl.set_mode(MotionMode::SlowRoll, &mut timers, 0).unwrap();
        ctl.set_playing(true, &mut timers, 0).unwrap();
        let state = ctl.set_mode(MotionMode::Tease, &mut timers, 10).unwrap();

        assert_eq!(state, PlayState::Stopped);
        assert!(!ctl.session().playing);
        assert_eq!(ctl.session().motion_mode, MotionMode::Tease);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_mode_change_keeps_play_when_allowed() {
        let policy = PlayPolicy {
            mode_change_stops_play: false,
            ..PlayPolicy::default()
        };
        let mut timers = Timers::new();
        let mut ctl = PlayController::new(PlayTiming::default(), &policy);

        ctl.set_mode(MotionMode::SlowRoll, &mut timers, 0).unwrap();
        ctl.set_playing(true, &mut timers, 0).unwrap();
        ctl.set_mode(MotionMode::Tease, &mut timers, 10).unwrap();

        assert!(ctl.session().playing);
        let handle = ctl.session().active_timer().unwrap();
        assert_eq!(timers.job_of(handle), Some(TimerJob::Pattern(MotionMode::Tease)));
        assert_eq!(pattern_timers(&timers), 1);

        // Switching to no pattern still ends play
        ctl.set_mode(MotionMode::None, &mut timers, 20).unwrap();
        assert!(!ctl.session().playing);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_disengage_stops_play() {
        let mut timers = Timers::new();
        let mut ctl = controller();

        ctl.set_engage_on_motion(true, &mut timers);
        ctl.set_mode(MotionMode::Wiggle, &mut timers, 0).unwrap();
        ctl.set_playing(true, &mut timers, 0).unwrap();

        let state = ctl.set_engage_on_motion(false, &mut timers);

        assert_eq!(state, PlayState::Stopped);
        assert!(!ctl.session().engage_on_motion);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_full_registry_leaves_play_off() {
        let mut timers: TimerRegistry<TimerJob, 1> = TimerRegistry::new();
        timers.set_timeout(0, 50, TimerJob::MotionSample).unwrap();
        let mut ctl = controller();

        ctl.set_mode(MotionMode::Tease, &mut timers, 0).unwrap();
        let result = ctl.set_playing(true, &mut timers, 0);

        assert_eq!(result, Err(SchedulerError::Full));
        assert!(!ctl.session().playing);
        assert_eq!(ctl.session().active_timer(), None);
    }
}
