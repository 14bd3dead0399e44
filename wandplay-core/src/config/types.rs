//! Configuration type definitions
//!
//! The defaults reproduce the stock wand build. A board can override any of
//! them from `wand.toml`.

use crate::motion::position::{
    WAND_HIGHEST, WAND_LOWEST, WAND_START, WAND_TOY_OFF_GROUND, WAND_TOY_ON_GROUND,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position limits and landmarks, in device units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WandLimits {
    /// Lowest allowed position
    pub lowest: i16,
    /// Highest allowed position
    pub highest: i16,
    /// Position applied at boot
    pub start: i16,
    /// Toy resting on the floor
    pub toy_on_ground: i16,
    /// Toy lifted just clear of the floor
    pub toy_off_ground: i16,
}

impl Default for WandLimits {
    fn default() -> Self {
        Self {
            lowest: WAND_LOWEST,
            highest: WAND_HIGHEST,
            start: WAND_START,
            toy_on_ground: WAND_TOY_ON_GROUND,
            toy_off_ground: WAND_TOY_OFF_GROUND,
        }
    }
}

impl WandLimits {
    pub fn contains(&self, value: i16) -> bool {
        (self.lowest..=self.highest).contains(&value)
    }

    /// Pull `value` into `[lowest, highest]`
    pub fn clamp(&self, value: i16) -> i16 {
        value.max(self.lowest).min(self.highest)
    }
}

/// Pattern periods and sensor timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayTiming {
    pub wiggle_period_ms: u32,
    pub tease_period_ms: u32,
    pub slow_roll_period_ms: u32,
    /// Delay between a sensor edge and the level sample
    pub debounce_ms: u32,
    /// Uptime report interval
    pub stats_interval_ms: u32,
}

impl Default for PlayTiming {
    fn default() -> Self {
        Self {
            wiggle_period_ms: 250,
            tease_period_ms: 1000,
            slow_roll_period_ms: 250,
            debounce_ms: 50,
            stats_interval_ms: 1000,
        }
    }
}

/// Servo output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// PWM frame rate
    pub frequency_hz: u16,
    /// Full-scale value of a device unit (value / duty_range = duty cycle)
    pub duty_range: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50,
            duty_range: 1023,
        }
    }
}

/// Behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayPolicy {
    /// Clamp remote position commands into the allowed range
    pub clamp_commanded_positions: bool,
    /// Changing the mode while playing stops play; when false the new
    /// pattern takes over immediately
    pub mode_change_stops_play: bool,
}

impl Default for PlayPolicy {
    fn default() -> Self {
        Self {
            clamp_commanded_positions: true,
            mode_change_stops_play: true,
        }
    }
}

/// Complete wand configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WandConfig {
    pub limits: WandLimits,
    pub timing: PlayTiming,
    pub servo: ServoConfig,
    pub policy: PlayPolicy,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// `lowest` is not below `highest`
    EmptyRange,
    /// `start` is outside the allowed range
    StartOutOfRange,
    /// A ground landmark is outside the allowed range, or on-ground is not
    /// below both off-ground and `highest`
    LandmarkOutOfRange,
    /// A pattern or stats period is zero; a zero debounce is allowed and
    /// samples on the next poll
    ZeroPeriod,
    /// Servo frequency or duty range is zero
    InvalidServo,
    /// `highest` does not fit in the duty range
    BeyondDutyRange,
}

impl WandConfig {
    /// Check the invariants the pattern generators and actuator rely on
    pub fn validate(&self) -> Result<(), ValidationError> {
        let l = &self.limits;
        if l.lowest >= l.highest {
            return Err(ValidationError::EmptyRange);
        }
        if !l.contains(l.start) {
            return Err(ValidationError::StartOutOfRange);
        }
        if !l.contains(l.toy_on_ground)
            || !l.contains(l.toy_off_ground)
            || l.toy_on_ground >= l.toy_off_ground
            || l.toy_on_ground >= l.highest
        {
            return Err(ValidationError::LandmarkOutOfRange);
        }

        let t = &self.timing;
        if t.wiggle_period_ms == 0
            || t.tease_period_ms == 0
            || t.slow_roll_period_ms == 0
            || t.stats_interval_ms == 0
        {
            return Err(ValidationError::ZeroPeriod);
        }

        if self.servo.frequency_hz == 0 || self.servo.duty_range == 0 {
            return Err(ValidationError::InvalidServo);
        }
        if l.lowest < 0 || l.highest as u16 > self.servo.duty_range {
            return Err(ValidationError::BeyondDutyRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WandConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.limits.lowest, 55);
        assert_eq!(config.limits.highest, 180);
        assert_eq!(config.timing.tease_period_ms, 1000);
        assert!(config.policy.clamp_commanded_positions);
    }

    #[test]
    fn test_clamp() {
        let limits = WandLimits::default();
        assert_eq!(limits.clamp(10), 55);
        assert_eq!(limits.clamp(500), 180);
        assert_eq!(limits.clamp(100), 100);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = WandConfig::default();
        config.limits.lowest = 180;
        config.limits.highest = 55;
        assert_eq!(config.validate(), Err(ValidationError::EmptyRange));
    }

    #[test]
    fn test_landmarks_must_be_ordered() {
        let mut config = WandConfig::default();
        config.limits.toy_on_ground = 95;
        assert_eq!(config.validate(), Err(ValidationError::LandmarkOutOfRange));
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut config = WandConfig::default();
        config.timing.wiggle_period_ms = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroPeriod));
    }

    #[test]
    fn test_zero_debounce_accepted() {
        let mut config = WandConfig::default();
        config.timing.debounce_ms = 0;
        assert_eq!(config.validate(), Ok(()));

        config.timing.stats_interval_ms = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroPeriod));
    }

    #[test]
    fn test_highest_must_fit_duty_range() {
        let mut config = WandConfig::default();
        config.servo.duty_range = 100;
        assert_eq!(config.validate(), Err(ValidationError::BeyondDutyRange));
    }
}
