//! Outbound message types for the bridge link

use heapless::String;

use crate::frame::{Frame, FrameError};
use crate::messages::{
    CH_MOTION_SENSED, CH_PLAY, CH_UPTIME, CH_WAND_POSITION, MSG_NOTIFY, MSG_PONG,
    MSG_SYNC_REQUEST,
};

/// Longest notification text carried on the link (bytes)
pub const MAX_NOTIFY_LEN: usize = 48;

/// Values published by the board
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Telemetry {
    /// Wand position written to the actuator
    WandPosition(i16),
    /// Debounced motion sensor level
    MotionSensed(bool),
    /// Play state chosen by the board (mirrors the dashboard switch)
    Playing(bool),
    /// Human-readable push notification
    Notify(String<MAX_NOTIFY_LEN>),
    /// Seconds since boot
    UptimeS(u32),
    /// Ask the dashboard to replay its stored values
    SyncRequest,
}

impl Telemetry {
    /// Build a notification, truncating on a char boundary if needed
    pub fn notify(text: &str) -> Self {
        let mut end = text.len().min(MAX_NOTIFY_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut s = String::new();
        // Length checked above
        let _ = s.push_str(&text[..end]);
        Telemetry::Notify(s)
    }

    /// Channel tag this value travels on
    pub fn channel(&self) -> u8 {
        match self {
            Telemetry::WandPosition(_) => CH_WAND_POSITION,
            Telemetry::MotionSensed(_) => CH_MOTION_SENSED,
            Telemetry::Playing(_) => CH_PLAY,
            Telemetry::Notify(_) => MSG_NOTIFY,
            Telemetry::UptimeS(_) => CH_UPTIME,
            Telemetry::SyncRequest => MSG_SYNC_REQUEST,
        }
    }

    /// Encode this value into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let tag = self.channel();
        match self {
            Telemetry::WandPosition(pos) => Frame::with_value(tag, pos),
            Telemetry::MotionSensed(on) | Telemetry::Playing(on) => Frame::with_value(tag, on),
            Telemetry::Notify(text) => Frame::with_value(tag, text.as_str()),
            Telemetry::UptimeS(secs) => Frame::with_value(tag, secs),
            Telemetry::SyncRequest => Ok(Frame::empty(tag)),
        }
    }

    /// Parse a telemetry frame (bridge side, or tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            CH_WAND_POSITION => Ok(Telemetry::WandPosition(frame.value()?)),
            CH_MOTION_SENSED => Ok(Telemetry::MotionSensed(frame.value()?)),
            CH_PLAY => Ok(Telemetry::Playing(frame.value()?)),
            MSG_NOTIFY => {
                let text: &str = frame.value()?;
                String::try_from(text)
                    .map(Telemetry::Notify)
                    .map_err(|_| FrameError::PayloadTooLarge)
            }
            CH_UPTIME => Ok(Telemetry::UptimeS(frame.value()?)),
            MSG_SYNC_REQUEST => Ok(Telemetry::SyncRequest),
            other => Err(FrameError::UnknownChannel(other)),
        }
    }
}

/// Everything the board can send to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceMessage {
    Telemetry(Telemetry),
    /// Heartbeat response
    Pong,
}

impl DeviceMessage {
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            DeviceMessage::Telemetry(t) => t.to_frame(),
            DeviceMessage::Pong => Ok(Frame::empty(MSG_PONG)),
        }
    }
}

impl From<Telemetry> for DeviceMessage {
    fn from(t: Telemetry) -> Self {
        DeviceMessage::Telemetry(t)
    }
}
