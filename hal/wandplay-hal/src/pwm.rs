//! PWM output abstraction

/// A single PWM output channel with a fixed frame rate
///
/// The channel counts from 0 to `max_compare()`; the output is high while
/// the counter is below the compare value.
pub trait PwmChannel {
    /// Compare value for 100% duty
    fn max_compare(&self) -> u16;

    /// Set the compare value; values above `max_compare()` saturate
    fn set_compare(&mut self, compare: u16);

    /// Set duty as `num / denom` of the frame
    fn set_duty_fraction(&mut self, num: u32, denom: u32) {
        if denom == 0 {
            return;
        }
        let max = u64::from(self.max_compare());
        let compare = (u64::from(num.min(denom)) * max) / u64::from(denom);
        self.set_compare(compare as u16);
    }
}
