//! Currency text normalization.
//!
//! Form fields arrive as free-form text such as `"$45,000"` or `"(1,200)"`.
//! [`normalize`] turns any such token into an `f64`. It never fails: text
//! that cannot be read as a number becomes `0.0`.

use tracing::warn;

/// Parse a raw currency token into a signed amount.
///
/// - surrounding whitespace is ignored
/// - `,` thousands separators are removed
/// - a leading `$` is removed, before or after a `-` sign
/// - `(1,200)` is accounting notation for `-1200`
/// - empty, unparseable or non-finite text yields `0.0`
pub fn normalize(raw: &str) -> f64 {
    if raw.trim().is_empty() {
        return 0.0;
    }
    match parse_amount(raw) {
        Some(v) => v,
        None => {
            warn!(raw, "unparseable amount normalized to 0");
            0.0
        }
    }
}

/// Strict form of [`normalize`]: `None` when the text is not an amount.
///
/// Accepts the same notation. At most one sign is allowed, and the number
/// itself must be plain digits with an optional decimal point (no exponent).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();

    let (parenthesized, body) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (true, inner.trim()),
        None => (false, trimmed),
    };

    let (mut signed, unsigned) = match body.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, body),
    };
    let mut digits = unsigned.strip_prefix('$').unwrap_or(unsigned).trim_start();
    if let Some(rest) = digits.strip_prefix('-') {
        if signed {
            return None;
        }
        signed = true;
        digits = rest;
    }

    let cleaned: String = digits.chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = cleaned.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let negate = parenthesized != signed;
    Some(if negate { -value } else { value })
}

/// Pass a numeric value through, mapping NaN and infinities to `0.0`.
pub fn normalize_number(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
