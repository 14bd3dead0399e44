//! Configuration loading
//!
//! The board configuration is `wand.toml`, embedded at build time and
//! parsed at boot.

pub mod loader;

pub use loader::load_config;
