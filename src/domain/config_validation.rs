//! Configuration validation.
//!
//! Checks the `[valuation]` section and resolves it, together with any
//! command-line overrides, into [`ValuationSettings`]. Input amounts are not
//! validated here; they are normalized silently.

use crate::domain::earnings::Mode;
use crate::domain::error::ValuatorError;
use crate::domain::normalize::parse_amount;
use crate::domain::valuation::{Multiples, ValuationBase};
use crate::ports::config_port::ConfigPort;

const SECTION: &str = "valuation";

/// Resolved valuation choices: mode, base strategy and multiples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationSettings {
    pub mode: Mode,
    pub base: ValuationBase,
    pub multiples: Multiples,
}

/// Command-line values that take precedence over `[valuation]` keys.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub mode: Option<String>,
    pub base: Option<String>,
    /// Currency text, read the same way as `[valuation] fixed_base`.
    pub fixed_base: Option<String>,
}

pub fn validate_valuation_config(config: &dyn ConfigPort) -> Result<(), ValuatorError> {
    resolve_settings(config, &SettingsOverrides::default()).map(|_| ())
}

pub fn resolve_settings(
    config: &dyn ConfigPort,
    overrides: &SettingsOverrides,
) -> Result<ValuationSettings, ValuatorError> {
    let mode = resolve_mode(config, overrides)?;
    let base = resolve_base(config, overrides)?;
    let multiples = resolve_multiples(config, mode)?;
    Ok(ValuationSettings {
        mode,
        base,
        multiples,
    })
}

fn required(
    config: &dyn ConfigPort,
    key: &str,
    override_value: Option<&String>,
) -> Result<String, ValuatorError> {
    match override_value.cloned().or_else(|| config.get_string(SECTION, key)) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValuatorError::missing(SECTION, key)),
    }
}

fn resolve_mode(
    config: &dyn ConfigPort,
    overrides: &SettingsOverrides,
) -> Result<Mode, ValuatorError> {
    let raw = required(config, "mode", overrides.mode.as_ref())?;
    raw.parse::<Mode>()
        .map_err(|reason| ValuatorError::invalid(SECTION, "mode", reason))
}

fn resolve_base(
    config: &dyn ConfigPort,
    overrides: &SettingsOverrides,
) -> Result<ValuationBase, ValuatorError> {
    let raw = required(config, "base", overrides.base.as_ref())?;
    if raw.trim().eq_ignore_ascii_case("fixed") {
        let value = parse_fixed_base(required(
            config,
            "fixed_base",
            overrides.fixed_base.as_ref(),
        )?)?;
        return ValuationBase::parse(&raw, Some(value))
            .map_err(|reason| ValuatorError::invalid(SECTION, "fixed_base", reason));
    }
    ValuationBase::parse(&raw, None)
        .map_err(|reason| ValuatorError::invalid(SECTION, "base", reason))
}

fn parse_fixed_base(raw: String) -> Result<f64, ValuatorError> {
    parse_amount(&raw).ok_or_else(|| {
        ValuatorError::invalid(
            SECTION,
            "fixed_base",
            format!("'{raw}' is not a currency amount"),
        )
    })
}

fn resolve_multiples(config: &dyn ConfigPort, mode: Mode) -> Result<Multiples, ValuatorError> {
    match config.get_string(SECTION, "multiples") {
        Some(s) if !s.trim().is_empty() => Multiples::parse(&s)
            .map_err(|reason| ValuatorError::invalid(SECTION, "multiples", reason)),
        _ => Ok(Multiples::for_mode(mode)),
    }
}
