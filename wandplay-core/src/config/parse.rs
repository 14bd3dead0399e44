//! Minimal TOML reader for `wand.toml`
//!
//! Handles only the subset the wand configuration needs:
//! - `[limits]`, `[timing]`, `[servo]`, `[policy]` section headers
//! - `key = value` pairs with integer or boolean values
//! - Comments (`# ...`), whole-line or trailing
//!
//! Keys that are not present keep their default value.

use core::str::FromStr;

use super::types::{ValidationError, WandConfig};

/// Parse error, tagged with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header is not one of the known sections
    UnknownSection(usize),
    /// Key is not valid in the current section
    UnknownKey(usize),
    /// Value does not parse as the key's type
    InvalidValue(usize),
    /// Line is neither a header nor a `key = value` pair
    Syntax(usize),
}

/// Errors from [`parse_config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    Parse(ParseError),
    Invalid(ValidationError),
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<ValidationError> for ConfigError {
    fn from(e: ValidationError) -> Self {
        ConfigError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Limits,
    Timing,
    Servo,
    Policy,
}

/// Parse and validate a wand configuration
pub fn parse_config(input: &str) -> Result<WandConfig, ConfigError> {
    let mut config = WandConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::UnknownSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax(line_no))?;
        apply_key(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "limits" => Some(Section::Limits),
        "timing" => Some(Section::Timing),
        "servo" => Some(Section::Servo),
        "policy" => Some(Section::Policy),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_key(
    config: &mut WandConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ParseError> {
    let limits = &mut config.limits;
    let timing = &mut config.timing;
    let servo = &mut config.servo;
    let policy = &mut config.policy;

    match (section, key) {
        (Section::Limits, "lowest") => limits.lowest = parse_int(value, line)?,
        (Section::Limits, "highest") => limits.highest = parse_int(value, line)?,
        (Section::Limits, "start") => limits.start = parse_int(value, line)?,
        (Section::Limits, "toy_on_ground") => limits.toy_on_ground = parse_int(value, line)?,
        (Section::Limits, "toy_off_ground") => limits.toy_off_ground = parse_int(value, line)?,

        (Section::Timing, "wiggle_period_ms") => timing.wiggle_period_ms = parse_int(value, line)?,
        (Section::Timing, "tease_period_ms") => timing.tease_period_ms = parse_int(value, line)?,
        (Section::Timing, "slow_roll_period_ms") => {
            timing.slow_roll_period_ms = parse_int(value, line)?
        }
        (Section::Timing, "debounce_ms") => timing.debounce_ms = parse_int(value, line)?,
        (Section::Timing, "stats_interval_ms") => {
            timing.stats_interval_ms = parse_int(value, line)?
        }

        (Section::Servo, "frequency_hz") => servo.frequency_hz = parse_int(value, line)?,
        (Section::Servo, "duty_range") => servo.duty_range = parse_int(value, line)?,

        (Section::Policy, "clamp_commanded_positions") => {
            policy.clamp_commanded_positions = parse_bool(value, line)?
        }
        (Section::Policy, "mode_change_stops_play") => {
            policy.mode_change_stops_play = parse_bool(value, line)?
        }

        _ => return Err(ParseError::UnknownKey(line)),
    }

    Ok(())
}

fn parse_int<T: FromStr>(value: &str, line: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue(line))
}

fn parse_bool(value: &str, line: usize) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue(line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(WandConfig::default()));
    }

    #[test]
    fn test_full_file() {
        let input = r#"
# Wand tuned for a shorter rod
[limits]
lowest = 60
highest = 170   # hard stop
start = 140
toy_on_ground = 90
toy_off_ground = 95

[timing]
wiggle_period_ms = 200
tease_period_ms = 800
slow_roll_period_ms = 300
debounce_ms = 40
stats_interval_ms = 2000

[servo]
frequency_hz = 50
duty_range = 1023

[policy]
clamp_commanded_positions = false
mode_change_stops_play = false
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.limits.lowest, 60);
        assert_eq!(config.limits.highest, 170);
        assert_eq!(config.limits.toy_off_ground, 95);
        assert_eq!(config.timing.tease_period_ms, 800);
        assert_eq!(config.timing.debounce_ms, 40);
        assert!(!config.policy.clamp_commanded_positions);
        assert!(!config.policy.mode_change_stops_play);
    }

    #[test]
    fn test_unknown_section() {
        let input = "[limits]\nlowest = 55\n[display]\n";
        assert_eq!(
            parse_config(input),
            Err(ConfigError::Parse(ParseError::UnknownSection(3)))
        );
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(
            parse_config("lowest = 55"),
            Err(ConfigError::Parse(ParseError::UnknownKey(1)))
        );
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[limits]\nlowest = low"),
            Err(ConfigError::Parse(ParseError::InvalidValue(2)))
        );
        assert_eq!(
            parse_config("[policy]\nmode_change_stops_play = 1"),
            Err(ConfigError::Parse(ParseError::InvalidValue(2)))
        );
        assert_eq!(
            parse_config("[timing]\ntease_period_ms"),
            Err(ConfigError::Parse(ParseError::Syntax(2)))
        );
    }

    #[test]
    fn test_parsed_config_is_validated() {
        assert_eq!(
            parse_config("[limits]\nstart = 20"),
            Err(ConfigError::Invalid(ValidationError::StartOutOfRange))
        );
    }
}
