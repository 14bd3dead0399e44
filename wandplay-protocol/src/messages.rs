//! Inbound message types for the bridge link
//!
//! Channel tags are shared by both directions where the dashboard shows the
//! same value it writes (wand position, play switch). Only the tags listed in
//! [`INBOUND_CHANNELS`] are accepted from the bridge.

use crate::frame::{Frame, FrameError};

// Dashboard channels
pub const CH_ENGAGE_ON_MOTION: u8 = 0x10;
pub const CH_WAND_POSITION: u8 = 0x11;
pub const CH_MOTION_MODE: u8 = 0x12;
pub const CH_PLAY: u8 = 0x13;
pub const CH_MOTION_SENSED: u8 = 0x14;
pub const CH_UPTIME: u8 = 0x1B;

// Link control
pub const MSG_PING: u8 = 0x02;
pub const MSG_PONG: u8 = 0x24;
pub const MSG_NOTIFY: u8 = 0x28;
pub const MSG_SYNC_REQUEST: u8 = 0x2F;

// Voice assistant entry point
pub const MSG_VOICE_SET_STATE: u8 = 0x30;

/// Commands accepted from the remote dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteCommand {
    /// Allow or forbid motion from starting play
    SetEngageOnMotion(bool),
    /// Select the motion pattern by its wire value; any integer is accepted
    SetMotionMode(i32),
    /// Start or stop play
    SetPlay(bool),
    /// Move the wand directly, in device units
    SetWandPosition(i16),
}

impl RemoteCommand {
    /// Channel tag this command travels on
    pub fn channel(&self) -> u8 {
        match self {
            RemoteCommand::SetEngageOnMotion(_) => CH_ENGAGE_ON_MOTION,
            RemoteCommand::SetMotionMode(_) => CH_MOTION_MODE,
            RemoteCommand::SetPlay(_) => CH_PLAY,
            RemoteCommand::SetWandPosition(_) => CH_WAND_POSITION,
        }
    }

    /// Encode this command into a frame (bridge side, or tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match *self {
            RemoteCommand::SetEngageOnMotion(on) => Frame::with_value(self.channel(), &on),
            RemoteCommand::SetMotionMode(mode) => Frame::with_value(self.channel(), &mode),
            RemoteCommand::SetPlay(on) => Frame::with_value(self.channel(), &on),
            RemoteCommand::SetWandPosition(pos) => Frame::with_value(self.channel(), &pos),
        }
    }
}

/// Commands from the voice assistant bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoiceCommand {
    /// "Turn on/off" for the virtual device
    SetState(bool),
}

impl VoiceCommand {
    /// The voice device is a plain on/off switch over play
    pub fn into_remote(self) -> RemoteCommand {
        match self {
            VoiceCommand::SetState(on) => RemoteCommand::SetPlay(on),
        }
    }
}

/// Everything the bridge can send to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkCommand {
    /// Dashboard value write
    Remote(RemoteCommand),
    /// Voice assistant request
    Voice(VoiceCommand),
    /// Heartbeat request
    Ping,
}

type Decoder = fn(&Frame) -> Result<LinkCommand, FrameError>;

/// Inbound dispatch table: channel tag to typed decoder
pub const INBOUND_CHANNELS: [(u8, Decoder); 6] = [
    (CH_ENGAGE_ON_MOTION, decode_engage_on_motion),
    (CH_WAND_POSITION, decode_wand_position),
    (CH_MOTION_MODE, decode_motion_mode),
    (CH_PLAY, decode_play),
    (MSG_VOICE_SET_STATE, decode_voice_set_state),
    (MSG_PING, decode_ping),
];

fn decode_engage_on_motion(frame: &Frame) -> Result<LinkCommand, FrameError> {
    Ok(LinkCommand::Remote(RemoteCommand::SetEngageOnMotion(frame.value()?)))
}

fn decode_wand_position(frame: &Frame) -> Result<LinkCommand, FrameError> {
    Ok(LinkCommand::Remote(RemoteCommand::SetWandPosition(frame.value()?)))
}

fn decode_motion_mode(frame: &Frame) -> Result<LinkCommand, FrameError> {
    Ok(LinkCommand::Remote(RemoteCommand::SetMotionMode(frame.value()?)))
}

fn decode_play(frame: &Frame) -> Result<LinkCommand, FrameError> {
    Ok(LinkCommand::Remote(RemoteCommand::SetPlay(frame.value()?)))
}

fn decode_voice_set_state(frame: &Frame) -> Result<LinkCommand, FrameError> {
    Ok(LinkCommand::Voice(VoiceCommand::SetState(frame.value()?)))
}

fn decode_ping(_frame: &Frame) -> Result<LinkCommand, FrameError> {
    Ok(LinkCommand::Ping)
}

impl LinkCommand {
    /// Parse a command from a frame via the inbound dispatch table
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let (_, decode) = INBOUND_CHANNELS
            .iter()
            .find(|(tag, _)| *tag == frame.msg_type)
            .ok_or(FrameError::UnknownChannel(frame.msg_type))?;
        decode(frame)
    }

    /// Encode this command into a frame (bridge side, or tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            LinkCommand::Remote(cmd) => cmd.to_frame(),
            LinkCommand::Voice(VoiceCommand::SetState(on)) => {
                Frame::with_value(MSG_VOICE_SET_STATE, on)
            }
            LinkCommand::Ping => Ok(Frame::empty(MSG_PING)),
        }
    }
}
