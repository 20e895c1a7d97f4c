//! Configuration validation.
//!
//! Validates bot and tentacles config files before any ceiling is enforced.

use crate::domain::bot_config::MarketType;
use crate::domain::error::PlanLimitError;
use crate::domain::plan::Ceiling;
use crate::domain::time_frame::parse_time_frames;
use crate::ports::config_port::ConfigPort;

pub const BOT_SECTION: &str = "bot";
pub const PLAN_SECTION: &str = "plan";
pub const EXCHANGE_SECTION_PREFIX: &str = "exchange:";
pub const CURRENCY_SECTION_PREFIX: &str = "currency:";
pub const STRATEGY_SECTION_PREFIX: &str = "strategy:";

pub const PLAN_KEYS: [&str; 3] = ["max_exchanges", "max_symbols", "max_time_frames"];

pub fn validate_bot_config(config: &dyn ConfigPort) -> Result<(), PlanLimitError> {
    for key in PLAN_KEYS {
        read_ceiling(config, key)?;
    }
    validate_time_frames_key(config, BOT_SECTION)?;
    validate_exchanges(config)?;
    validate_currencies(config)?;
    Ok(())
}

pub fn validate_tentacles_config(config: &dyn ConfigPort) -> Result<(), PlanLimitError> {
    for section in config.sections() {
        if section.starts_with(STRATEGY_SECTION_PREFIX) {
            check_section_name(&section, STRATEGY_SECTION_PREFIX, "strategy")?;
            validate_bool_key(config, &section, "activated")?;
            validate_time_frames_key(config, &section)?;
        }
    }
    Ok(())
}

/// Reads a `[plan]` ceiling. A missing key means unlimited.
pub fn read_ceiling(config: &dyn ConfigPort, key: &str) -> Result<Ceiling, PlanLimitError> {
    let Some(raw) = config.get_string(PLAN_SECTION, key) else {
        return Ok(Ceiling::Unlimited);
    };
    let invalid = |reason: String| PlanLimitError::ConfigInvalid {
        section: PLAN_SECTION.to_string(),
        key: key.to_string(),
        reason,
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(format!("{key} must be an integer")))?;
    Ceiling::from_setting(value).map_err(|e| invalid(e.to_string()))
}

/// Name part of a prefixed section, e.g. `binance` for `exchange:binance`.
///
/// The name is returned verbatim: writers rebuild the section as
/// `{prefix}{name}`, so it must round-trip to the same section.
pub fn section_name<'a>(section: &'a str, prefix: &str) -> Option<&'a str> {
    section
        .strip_prefix(prefix)
        .filter(|name| !name.is_empty())
}

/// Accepted spellings of a boolean setting.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn check_section_name(section: &str, prefix: &str, kind: &str) -> Result<(), PlanLimitError> {
    let name = section.strip_prefix(prefix).unwrap_or_default();
    let reason = if name.trim().is_empty() {
        format!("{kind} section needs a name")
    } else if name != name.trim() {
        format!("{kind} name must not start or end with whitespace")
    } else {
        return Ok(());
    };
    Err(PlanLimitError::ConfigInvalid {
        section: section.to_string(),
        key: "name".to_string(),
        reason,
    })
}

fn validate_bool_key(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), PlanLimitError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    match parse_bool(&raw) {
        Some(_) => Ok(()),
        None => Err(PlanLimitError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("expected true or false, got {raw}"),
        }),
    }
}

fn validate_time_frames_key(config: &dyn ConfigPort, section: &str) -> Result<(), PlanLimitError> {
    if let Some(raw) = config.get_string(section, "time_frames") {
        parse_time_frames(&raw).map_err(|e| PlanLimitError::ConfigInvalid {
            section: section.to_string(),
            key: "time_frames".to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

fn validate_exchanges(config: &dyn ConfigPort) -> Result<(), PlanLimitError> {
    for section in config.sections() {
        if !section.starts_with(EXCHANGE_SECTION_PREFIX) {
            continue;
        }
        check_section_name(&section, EXCHANGE_SECTION_PREFIX, "exchange")?;
        validate_bool_key(config, &section, "enabled")?;
        if let Some(raw) = config.get_string(&section, "market_type") {
            raw.parse::<MarketType>()
                .map_err(|reason| PlanLimitError::ConfigInvalid {
                    section: section.clone(),
                    key: "market_type".to_string(),
                    reason,
                })?;
        }
    }
    Ok(())
}

fn validate_currencies(config: &dyn ConfigPort) -> Result<(), PlanLimitError> {
    for section in config.sections() {
        if !section.starts_with(CURRENCY_SECTION_PREFIX) {
            continue;
        }
        check_section_name(&section, CURRENCY_SECTION_PREFIX, "currency")?;
        validate_bool_key(config, &section, "enabled")?;
        if config.get_string(&section, "pairs").is_none() {
            return Err(PlanLimitError::ConfigMissing {
                section: section.clone(),
                key: "pairs".to_string(),
            });
        }
    }
    Ok(())
}
