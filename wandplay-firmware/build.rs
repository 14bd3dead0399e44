//! Build script for wandplay-firmware
//!
//! - Sets up linker search paths and scripts
//! - Validates wand.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate wand.toml at compile time
///
/// The firmware parses the same file at boot and falls back to defaults if
/// it is rejected; failing here keeps a bad file from ever being flashed.
fn validate_config() {
    println!("cargo:rerun-if-changed=wand.toml");

    let config_path = Path::new("wand.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: wand.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds wand.toml at build time.                    ║\n\
            ║  Please create one in the wandplay-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read wand.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in wand.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_known_keys(&config, &mut errors);
    validate_limits(&config, &mut errors);
    validate_timing(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid wand configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=wand.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const SECTIONS: &[(&str, &[&str])] = &[
    (
        "limits",
        &["lowest", "highest", "start", "toy_on_ground", "toy_off_ground"],
    ),
    (
        "timing",
        &[
            "wiggle_period_ms",
            "tease_period_ms",
            "slow_roll_period_ms",
            "debounce_ms",
            "stats_interval_ms",
        ],
    ),
    ("servo", &["frequency_hz", "duty_range"]),
    (
        "policy",
        &["clamp_commanded_positions", "mode_change_stops_play"],
    ),
];

/// Every section and key must be one the firmware parser knows
fn validate_known_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, value) in root {
        let Some((_, keys)) = SECTIONS.iter().find(|(name, _)| *name == section.as_str()) else {
            errors.push(format!("unknown section [{}]", section));
            continue;
        };
        let Some(table) = value.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };
        for (key, value) in table {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            } else if section == "policy" && !value.is_bool() {
                errors.push(format!("[{}] {} must be true or false", section, key));
            } else if section != "policy" && !value.is_integer() {
                errors.push(format!("[{}] {} must be an integer", section, key));
            }
        }
    }
}

fn get_int(config: &toml::Value, section: &str, key: &str, default: i64) -> i64 {
    config
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_integer())
        .unwrap_or(default)
}

/// Range and landmark ordering checks, mirroring the firmware's validation
fn validate_limits(config: &toml::Value, errors: &mut Vec<String>) {
    let lowest = get_int(config, "limits", "lowest", 55);
    let highest = get_int(config, "limits", "highest", 180);
    let start = get_int(config, "limits", "start", 150);
    let on_ground = get_int(config, "limits", "toy_on_ground", 88);
    let off_ground = get_int(config, "limits", "toy_off_ground", 92);
    let duty_range = get_int(config, "servo", "duty_range", 1023);

    if lowest < 0 || highest > duty_range {
        errors.push(format!(
            "[limits] range must fit within 0..={} (duty_range)",
            duty_range
        ));
    }
    if lowest >= highest {
        errors.push("[limits] lowest must be below highest".to_string());
    }
    if start < lowest || start > highest {
        errors.push("[limits] start must be within lowest..=highest".to_string());
    }
    if on_ground < lowest || off_ground > highest || on_ground >= off_ground {
        errors.push(
            "[limits] need lowest <= toy_on_ground < toy_off_ground <= highest".to_string(),
        );
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    for key in [
        "wiggle_period_ms",
        "tease_period_ms",
        "slow_roll_period_ms",
        "stats_interval_ms",
    ] {
        if get_int(config, "timing", key, 1) <= 0 {
            errors.push(format!("[timing] {} must be positive", key));
        }
    }
    if get_int(config, "timing", "debounce_ms", 0) < 0 {
        errors.push("[timing] debounce_ms must not be negative".to_string());
    }
    if get_int(config, "servo", "frequency_hz", 50) <= 0 {
        errors.push("[servo] frequency_hz must be positive".to_string());
    }
}
