//! Motion patterns
//!
//! Each pattern maps the current position to the next one. The play
//! controller calls the selected pattern once per period while playing.

use rand::{Rng, RngCore};

use crate::config::{PlayTiming, WandLimits};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selected play pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotionMode {
    /// No pattern; playing is not possible
    #[default]
    None,
    /// Jump to a random position in range
    Wiggle,
    /// Alternate between toy on and off the ground
    Tease,
    /// Sweep one unit at a time between the ground and the top
    SlowRoll,
}

impl MotionMode {
    /// Decode the dashboard's mode selector; unknown values select nothing
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => MotionMode::Wiggle,
            2 => MotionMode::Tease,
            3 => MotionMode::SlowRoll,
            _ => MotionMode::None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            MotionMode::None => 0,
            MotionMode::Wiggle => 1,
            MotionMode::Tease => 2,
            MotionMode::SlowRoll => 3,
        }
    }

    /// Tick period for this pattern, None if there is nothing to play
    pub fn period_ms(self, timing: &PlayTiming) -> Option<u32> {
        match self {
            MotionMode::None => None,
            MotionMode::Wiggle => Some(timing.wiggle_period_ms),
            MotionMode::Tease => Some(timing.tease_period_ms),
            MotionMode::SlowRoll => Some(timing.slow_roll_period_ms),
        }
    }
}

/// Next-position function of a pattern
pub trait PatternGenerator {
    fn next_position<R: RngCore>(&mut self, current: i16, limits: &WandLimits, rng: &mut R) -> i16;
}

/// Uniformly random position in `[lowest, highest]`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWiggle;

impl PatternGenerator for RandomWiggle {
    fn next_position<R: RngCore>(&mut self, _current: i16, limits: &WandLimits, rng: &mut R) -> i16 {
        if limits.lowest >= limits.highest {
            return limits.lowest;
        }
        rng.gen_range(limits.lowest..=limits.highest)
    }
}

/// Toggle between on-ground and off-ground
///
/// Only the off-ground landmark drops to the floor; any other position
/// lifts to off-ground.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tease;

impl PatternGenerator for Tease {
    fn next_position<R: RngCore>(&mut self, current: i16, limits: &WandLimits, _rng: &mut R) -> i16 {
        if current == limits.toy_off_ground {
            limits.toy_on_ground
        } else {
            limits.toy_off_ground
        }
    }
}

/// One-unit sweep between on-ground and `highest`
///
/// A start outside the band is pulled to the nearest bound first. The
/// direction survives across play sessions.
#[derive(Debug, Clone, Copy)]
pub struct SlowRoll {
    direction: i16,
}

impl Default for SlowRoll {
    fn default() -> Self {
        Self { direction: 1 }
    }
}

impl SlowRoll {
    /// +1 while rising, -1 while falling
    pub fn direction(&self) -> i16 {
        self.direction
    }
}

impl PatternGenerator for SlowRoll {
    fn next_position<R: RngCore>(&mut self, current: i16, limits: &WandLimits, _rng: &mut R) -> i16 {
        let position = current.max(limits.toy_on_ground).min(limits.highest);

        if position >= limits.highest {
            self.direction = -1;
        } else if position <= limits.toy_on_ground {
            self.direction = 1;
        }

        position + self.direction
    }
}

/// The generators the controller dispatches to by mode
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternBank {
    wiggle: RandomWiggle,
    tease: Tease,
    slow_roll: SlowRoll,
}

impl PatternBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next position for `mode`, None for [`MotionMode::None`]
    pub fn step<R: RngCore>(
        &mut self,
        mode: MotionMode,
        current: i16,
        limits: &WandLimits,
        rng: &mut R,
    ) -> Option<i16> {
        match mode {
            MotionMode::None => None,
            MotionMode::Wiggle => Some(self.wiggle.next_position(current, limits, rng)),
            MotionMode::Tease => Some(self.tease.next_position(current, limits, rng)),
            MotionMode::SlowRoll => Some(self.slow_roll.next_position(current, limits, rng)),
        }
    }
}
