//! Outbound telemetry and notification channel

use wandplay_protocol::Telemetry;

/// Destination for values the engine publishes
///
/// Publishing never fails from the engine's point of view. Implementations
/// that queue (the firmware's link channel) drop on overflow and log it.
pub trait TelemetrySink {
    fn publish(&mut self, value: Telemetry);
}
