//! Wandplay Bridge Link Protocol
//!
//! This crate defines the UART protocol between the RP2040 (wand controller)
//! and the network bridge that fronts the remote dashboard and the voice
//! assistant. The bridge owns every network concern; the board only ever sees
//! typed commands coming in and telemetry going out.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–64B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! TYPE is the channel tag (dashboard value, voice entry point, or link
//! control). PAYLOAD carries the channel value encoded with postcard.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod telemetry;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{LinkCommand, RemoteCommand, VoiceCommand};
pub use telemetry::{DeviceMessage, Telemetry, MAX_NOTIFY_LEN};
