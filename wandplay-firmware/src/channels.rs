//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Only the controller task touches the engine; everything else talks to it
//! through these.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use portable_atomic::AtomicBool;

use wandplay_protocol::{DeviceMessage, RemoteCommand};

/// Channel capacity for remote commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound link messages
const OUTBOUND_CHANNEL_SIZE: usize = 16;

/// Commands from the dashboard and voice bridges
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, RemoteCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Telemetry, notifications, and pongs waiting to go out on the link
pub static OUTBOUND_CHANNEL: Channel<
    CriticalSectionRawMutex,
    DeviceMessage,
    OUTBOUND_CHANNEL_SIZE,
> = Channel::new();

/// Time of the latest motion sensor edge
///
/// A signal holds one value, so a burst of edges collapses into the latest.
pub static MOTION_EDGE: Signal<CriticalSectionRawMutex, Instant> = Signal::new();

/// Sensor level as of the latest edge
pub static MOTION_LEVEL: AtomicBool = AtomicBool::new(false);
