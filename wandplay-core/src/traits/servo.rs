//! Position output trait

/// Hardware channel that holds the wand at a position
///
/// Values are in device units (the same units the dashboard slider and the
/// configured limits use). Converting to a pulse width or duty cycle is the
/// driver's job.
pub trait ServoDriver {
    /// Drive the output to `value`
    fn apply(&mut self, value: i16);
}
