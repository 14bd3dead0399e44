//! PWM slice setup for servo output
//!
//! A servo expects one pulse per frame (50 Hz for most hobby servos). The
//! slice counter wraps at [`SERVO_PWM_TOP`]; the clock divider is chosen so
//! that one wrap takes exactly one frame.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::traits::ToFixed;

/// Counter top used for servo frames (25000 counts per frame)
pub const SERVO_PWM_TOP: u16 = 24_999;

/// Largest integer part the RP2040 divider accepts
const MAX_DIVIDER: u32 = 255;

/// PWM configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Frame rate is zero
    ZeroFrequency,
    /// Requested frame rate needs a divider outside 1..=255
    DividerOutOfRange,
}

/// Build a slice configuration for `frequency_hz` frames per second
///
/// Output A starts low (compare 0) until the first position is applied.
pub fn servo_pwm_config(frequency_hz: u16) -> Result<Config, PwmError> {
    if frequency_hz == 0 {
        return Err(PwmError::ZeroFrequency);
    }

    let counts_per_second = u32::from(frequency_hz) * (u32::from(SERVO_PWM_TOP) + 1);
    let divider = clk_sys_freq() / counts_per_second;
    if divider == 0 || divider > MAX_DIVIDER {
        return Err(PwmError::DividerOutOfRange);
    }

    let mut config = Config::default();
    config.top = SERVO_PWM_TOP;
    config.divider = divider.to_fixed();
    config.compare_a = 0;
    Ok(config)
}

/// Output A of one PWM slice
pub struct RpPwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> RpPwm<'d> {
    /// Wrap a slice created with `config` (see [`servo_pwm_config`])
    pub fn new(pwm: Pwm<'d>, config: Config) -> Self {
        Self { pwm, config }
    }
}

impl wandplay_hal::PwmChannel for RpPwm<'_> {
    fn max_compare(&self) -> u16 {
        self.config.top
    }

    fn set_compare(&mut self, compare: u16) {
        self.config.compare_a = compare.min(self.config.top);
        self.pwm.set_config(&self.config);
    }
}
