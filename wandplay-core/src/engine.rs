//! Wand engine
//!
//! Owns every piece of mutable application state and the timer registry.
//! The firmware drives it from a single task: remote commands, sensor
//! edges, and due timers are all handled here one at a time, so no handler
//! ever observes a half-applied change.

use rand::RngCore;
use wandplay_protocol::{RemoteCommand, Telemetry};

use crate::config::WandConfig;
use crate::motion::{MotionMode, PositionActuator, WandPosition};
use crate::play::{PlayController, PlaySession, TimerJob};
use crate::scheduler::{SchedulerError, TimerHandle, TimerRegistry};
use crate::sensor::{decide, MotionDebouncer};
use crate::state::PlayState;
use crate::traits::{MotionSensor, ServoDriver, TelemetrySink};

/// Timer capacity: one pattern timer and one pending motion sample, with
/// headroom
pub const MAX_TIMERS: usize = 4;

pub type WandTimers = TimerRegistry<TimerJob, MAX_TIMERS>;

pub struct WandEngine<S: ServoDriver, R: RngCore> {
    config: WandConfig,
    timers: WandTimers,
    controller: PlayController,
    debouncer: MotionDebouncer,
    actuator: PositionActuator<S>,
    rng: R,
}

impl<S: ServoDriver, R: RngCore> WandEngine<S, R> {
    pub fn new(config: WandConfig, servo: S, rng: R) -> Self {
        Self {
            timers: WandTimers::new(),
            controller: PlayController::new(config.timing, &config.policy),
            debouncer: MotionDebouncer::new(config.timing.debounce_ms),
            actuator: PositionActuator::new(servo, config.limits.start),
            config,
            rng,
        }
    }

    /// Move to the start position and ask the remote for its stored values
    pub fn boot<T: TelemetrySink>(&mut self, sink: &mut T) {
        self.actuator.set_position(self.config.limits.start, sink);
        sink.publish(Telemetry::SyncRequest);
    }

    /// Apply a command from the remote dashboard or voice assistant
    pub fn handle_command<T: TelemetrySink>(
        &mut self,
        command: RemoteCommand,
        now_ms: u64,
        sink: &mut T,
    ) -> Result<PlayState, SchedulerError> {
        match command {
            RemoteCommand::SetEngageOnMotion(engage) => {
                Ok(self.controller.set_engage_on_motion(engage, &mut self.timers))
            }
            RemoteCommand::SetMotionMode(raw) => {
                self.controller
                    .set_mode(MotionMode::from_raw(raw), &mut self.timers, now_ms)
            }
            RemoteCommand::SetPlay(playing) => {
                self.controller
                    .set_playing(playing, &mut self.timers, now_ms)
            }
            RemoteCommand::SetWandPosition(value) => {
                let value = if self.config.policy.clamp_commanded_positions {
                    self.config.limits.clamp(value)
                } else {
                    value
                };
                self.actuator.set_position(value, sink);
                Ok(self.controller.state())
            }
        }
    }

    /// Record a sensor edge; the level is sampled after the debounce delay
    pub fn motion_edge(&mut self, now_ms: u64) -> Result<TimerHandle, SchedulerError> {
        self.debouncer.edge(&mut self.timers, now_ms)
    }

    /// Run every job due at `now_ms`
    ///
    /// Returns the number of jobs run.
    pub fn poll<M: MotionSensor, T: TelemetrySink>(
        &mut self,
        now_ms: u64,
        sensor: &mut M,
        sink: &mut T,
    ) -> Result<usize, SchedulerError> {
        let mut ran = 0;
        while let Some(fired) = self.timers.pop_due(now_ms) {
            ran += 1;
            match fired.job {
                TimerJob::Pattern(mode) => self.pattern_tick(mode, sink),
                TimerJob::MotionSample => {
                    self.motion_sample(fired.handle, now_ms, sensor, sink)?
                }
            }
        }
        Ok(ran)
    }

    fn pattern_tick<T: TelemetrySink>(&mut self, mode: MotionMode, sink: &mut T) {
        let current = self.actuator.position().value();
        if let Some(next) =
            self.controller
                .next_position(mode, current, &self.config.limits, &mut self.rng)
        {
            self.actuator.set_position(next, sink);
        }
    }

    fn motion_sample<M: MotionSensor, T: TelemetrySink>(
        &mut self,
        handle: TimerHandle,
        now_ms: u64,
        sensor: &mut M,
        sink: &mut T,
    ) -> Result<(), SchedulerError> {
        let Some(sample) = self.debouncer.sample(handle, sensor) else {
            return Ok(());
        };
        sink.publish(Telemetry::MotionSensed(sample.sensed));

        let engage = self.controller.session().engage_on_motion;
        if let Some(decision) = decide(engage, sample.sensed) {
            if let Some(text) = decision.notification() {
                sink.publish(Telemetry::notify(text));
            }
            let result = self
                .controller
                .set_playing(decision.playing(), &mut self.timers, now_ms);
            sink.publish(Telemetry::Playing(self.controller.session().playing));
            result?;
        }
        Ok(())
    }

    /// Earliest time `poll` has work to do
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    pub fn session(&self) -> &PlaySession {
        self.controller.session()
    }

    pub fn state(&self) -> PlayState {
        self.controller.state()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.session().playing
    }

    pub fn position(&self) -> WandPosition {
        self.actuator.position()
    }

    pub fn config(&self) -> &WandConfig {
        &self.config
    }

    pub fn timers(&self) -> &WandTimers {
        &self.timers
    }

    pub fn servo(&self) -> &S {
        self.actuator.servo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayPolicy;
    use crate::sensor::MOTION_ALERT;
    use crate::testing::{FakeServo, FixedSensor, RecordingSink};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    type Engine = WandEngine<FakeServo, SmallRng>;

    fn engine() -> Engine {
        engine_with(WandConfig::default())
    }

    fn engine_with(config: WandConfig) -> Engine {
        WandEngine::new(config, FakeServo::default(), SmallRng::seed_from_u64(42))
    }

    fn pattern_timers(engine: &Engine) -> usize {
        engine
            .timers()
            .count_matching(|job| matches!(job, TimerJob::Pattern(_)))
    }

    #[test]
    fn test_boot_applies_start_and_requests_sync() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();

        engine.boot(&mut sink);

        assert_eq!(engine.servo().applied.as_slice(), &[150]);
        assert_eq!(
            sink.sent.as_slice(),
            &[Telemetry::WandPosition(150), Telemetry::SyncRequest]
        );
    }

    #[test]
    fn test_tease_from_start() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor::default();
        engine.boot(&mut sink);
        sink.clear();

        engine
            .handle_command(RemoteCommand::SetMotionMode(2), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();

        for now in [1000, 2000, 3000] {
            engine.poll(now, &mut sensor, &mut sink).unwrap();
        }

        assert_eq!(
            sink.sent.as_slice(),
            &[
                Telemetry::WandPosition(92),
                Telemetry::WandPosition(88),
                Telemetry::WandPosition(92),
            ]
        );
    }

    #[test]
    fn test_slow_roll_reverses_at_top() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor::default();
        engine
            .handle_command(RemoteCommand::SetWandPosition(178), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetMotionMode(3), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();
        sink.clear();

        for tick in 1..=4 {
            engine.poll(tick * 250, &mut sensor, &mut sink).unwrap();
        }

        assert_eq!(engine.servo().applied.as_slice(), &[178, 179, 180, 179, 178]);
    }

    #[test]
    fn test_wiggle_stays_in_range() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor::default();
        engine
            .handle_command(RemoteCommand::SetMotionMode(1), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();

        for tick in 1..=200 {
            engine.poll(tick * 250, &mut sensor, &mut sink).unwrap();
        }

        assert_eq!(engine.servo().applied.len(), 200);
        assert!(engine
            .servo()
            .applied
            .iter()
            .all(|&v| (55..=180).contains(&v)));
    }

    #[test]
    fn test_repeated_play_keeps_one_pattern_timer() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        engine
            .handle_command(RemoteCommand::SetMotionMode(1), 0, &mut sink)
            .unwrap();

        for now in 0..20 {
            engine
                .handle_command(RemoteCommand::SetPlay(true), now, &mut sink)
                .unwrap();
        }

        assert_eq!(pattern_timers(&engine), 1);
    }

    #[test]
    fn test_unknown_mode_selects_none() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        engine
            .handle_command(RemoteCommand::SetMotionMode(2), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();

        engine
            .handle_command(RemoteCommand::SetMotionMode(7), 10, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 20, &mut sink)
            .unwrap();

        assert_eq!(engine.session().motion_mode, MotionMode::None);
        assert!(!engine.is_playing());
        assert_eq!(pattern_timers(&engine), 0);
    }

    #[test]
    fn test_wide_mode_value_stops_play() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        engine
            .handle_command(RemoteCommand::SetMotionMode(3), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();
        assert!(engine.is_playing());

        // 259 would alias SlowRoll if truncated to a byte
        let state = engine
            .handle_command(RemoteCommand::SetMotionMode(259), 10, &mut sink)
            .unwrap();

        assert_eq!(state, PlayState::Stopped);
        assert_eq!(engine.session().motion_mode, MotionMode::None);
        assert_eq!(pattern_timers(&engine), 0);
    }

    #[test]
    fn test_position_command_is_clamped() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();

        engine
            .handle_command(RemoteCommand::SetWandPosition(300), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetWandPosition(-4), 0, &mut sink)
            .unwrap();

        assert_eq!(engine.servo().applied.as_slice(), &[180, 55]);
        assert_eq!(engine.position().value(), 55);
    }

    #[test]
    fn test_position_command_unclamped_by_policy() {
        let mut config = WandConfig::default();
        config.policy = PlayPolicy {
            clamp_commanded_positions: false,
            ..PlayPolicy::default()
        };
        let mut engine = engine_with(config);
        let mut sink = RecordingSink::default();

        engine
            .handle_command(RemoteCommand::SetWandPosition(300), 0, &mut sink)
            .unwrap();

        assert_eq!(sink.sent.as_slice(), &[Telemetry::WandPosition(300)]);
    }

    #[test]
    fn test_motion_engages_play() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor {
            present: true,
            ..Default::default()
        };
        engine
            .handle_command(RemoteCommand::SetEngageOnMotion(true), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetMotionMode(1), 0, &mut sink)
            .unwrap();

        engine.motion_edge(1000).unwrap();
        engine.motion_edge(1010).unwrap();
        engine.motion_edge(1020).unwrap();
        assert_eq!(engine.poll(1069, &mut sensor, &mut sink).unwrap(), 0);
        assert_eq!(engine.poll(1070, &mut sensor, &mut sink).unwrap(), 1);

        assert_eq!(sensor.reads, 1);
        assert_eq!(
            sink.sent.as_slice(),
            &[
                Telemetry::MotionSensed(true),
                Telemetry::notify(MOTION_ALERT),
                Telemetry::Playing(true),
            ]
        );
        assert!(engine.is_playing());
        assert_eq!(pattern_timers(&engine), 1);

        // Motion gone: play stops without a notification
        sensor.present = false;
        sink.clear();
        engine.motion_edge(1100).unwrap();
        engine.poll(1150, &mut sensor, &mut sink).unwrap();

        assert_eq!(
            sink.sent.as_slice(),
            &[Telemetry::MotionSensed(false), Telemetry::Playing(false)]
        );
        assert!(!engine.is_playing());
        assert_eq!(pattern_timers(&engine), 0);
    }

    #[test]
    fn test_motion_only_reported_when_disengaged() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor {
            present: true,
            ..Default::default()
        };
        engine
            .handle_command(RemoteCommand::SetMotionMode(1), 0, &mut sink)
            .unwrap();

        engine.motion_edge(0).unwrap();
        engine.poll(50, &mut sensor, &mut sink).unwrap();

        assert_eq!(sink.sent.as_slice(), &[Telemetry::MotionSensed(true)]);
        assert!(!engine.is_playing());
    }

    #[test]
    fn test_disengage_while_playing() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor::default();
        engine
            .handle_command(RemoteCommand::SetEngageOnMotion(true), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetMotionMode(3), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();

        let state = engine
            .handle_command(RemoteCommand::SetEngageOnMotion(false), 100, &mut sink)
            .unwrap();

        assert_eq!(state, PlayState::Stopped);
        assert_eq!(engine.poll(10_000, &mut sensor, &mut sink).unwrap(), 0);
        assert!(engine.next_deadline().is_none());
    }

    #[test]
    fn test_stopped_pattern_never_ticks_again() {
        let mut engine = engine();
        let mut sink = RecordingSink::default();
        let mut sensor = FixedSensor::default();
        engine
            .handle_command(RemoteCommand::SetMotionMode(2), 0, &mut sink)
            .unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(true), 0, &mut sink)
            .unwrap();
        engine.poll(1000, &mut sensor, &mut sink).unwrap();
        engine
            .handle_command(RemoteCommand::SetPlay(false), 1500, &mut sink)
            .unwrap();

        assert_eq!(engine.poll(5000, &mut sensor, &mut sink).unwrap(), 0);
        assert_eq!(engine.servo().applied.as_slice(), &[92]);
    }
}
