/// Presence sensor read once per debounced sample
///
/// The read is expected to always succeed; a PIR output is a plain logic
/// level.
pub trait MotionSensor {
    /// Instantaneous level: true while motion is reported
    fn motion_present(&mut self) -> bool;
}
