//! Configuration types
//!
//! Board-agnostic configuration structures and the `wand.toml` reader.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError, ParseError};
pub use types::*;
