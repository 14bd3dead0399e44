//! Embedded configuration loader

use defmt::*;

use wandplay_core::config::{parse_config, WandConfig};

/// Embedded board configuration (compiled into firmware)
/// Edit wand.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../wand.toml");

/// Parse the embedded configuration, falling back to built-in defaults
pub fn load_config() -> WandConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            WandConfig::default()
        }
    }
}
