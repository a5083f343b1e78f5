//! # Amount Units
//!
//! Conversions between the decimal strings typed into the forms and the raw
//! integer amounts contracts expect. Scaling is done on `U256` so amounts
//! are never routed through floating point on their way to a transaction.
//! `f64` is only used for form validity checks and the displayed rate.

use alloy_primitives::U256;
use lazy_regex::regex_is_match;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    NotDecimal(String),

    #[error("'{0}' does not fit in 256 bits")]
    Overflow(String),
}

/// Sign-free decimal with an optional `.` or `,` separator. The empty string
/// passes so a field can be cleared.
pub fn is_decimal_input(input: &str) -> bool {
    regex_is_match!(r"^[0-9]*[.,]?[0-9]*$", input)
}

fn normalize(input: &str) -> String {
    input.trim().replace(',', ".")
}

fn pow10(decimals: u8) -> U256 {
    U256::from(10u64).pow(U256::from(decimals))
}

/// Parse a user-entered decimal into a raw integer amount scaled by
/// `10^decimals`. Fraction digits beyond `decimals` are truncated.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(AmountError::Empty);
    }
    if !is_decimal_input(&normalized) || normalized == "." {
        return Err(AmountError::NotDecimal(input.to_string()));
    }

    let (whole, fraction) = normalized
        .split_once('.')
        .unwrap_or((normalized.as_str(), ""));
    let whole = if whole.is_empty() { "0" } else { whole };

    let mut fraction: String = fraction.chars().take(decimals as usize).collect();
    while fraction.len() < decimals as usize {
        fraction.push('0');
    }

    let overflow = || AmountError::Overflow(input.to_string());
    let whole = U256::from_str_radix(whole, 10).map_err(|_| overflow())?;
    let fraction = if fraction.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(&fraction, 10).map_err(|_| overflow())?
    };

    whole
        .checked_mul(pow10(decimals))
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Render a raw amount as an exact decimal string, trailing zeros trimmed.
pub fn format_amount(raw: U256, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    let unit = pow10(decimals);
    let whole = raw / unit;
    let fraction = raw % unit;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Render a decimal string with exactly `places` fraction digits.
///
/// Extra digits are cut, not rounded. Strings that are not plain decimals
/// are returned untouched.
pub fn to_fixed(input: &str, places: usize) -> String {
    let normalized = normalize(input);
    if normalized.is_empty() || !is_decimal_input(&normalized) || normalized == "." {
        return input.to_string();
    }

    let (whole, fraction) = normalized
        .split_once('.')
        .unwrap_or((normalized.as_str(), ""));
    let whole = if whole.is_empty() { "0" } else { whole };
    if places == 0 {
        return whole.to_string();
    }

    let mut fraction: String = fraction.chars().take(places).collect();
    while fraction.len() < places {
        fraction.push('0');
    }
    format!("{}.{}", whole, fraction)
}

/// Lenient numeric read of a form field. `None` for empty or non-decimal input.
pub fn amount_value(input: &str) -> Option<f64> {
    let normalized = normalize(input);
    if normalized.is_empty() || normalized == "." || !is_decimal_input(&normalized) {
        return None;
    }
    normalized.parse::<f64>().ok()
}

/// Units of `to` received per unit of `from`, six fraction digits.
pub fn exchange_rate(from_amount: &str, to_amount: &str) -> Option<String> {
    let from = amount_value(from_amount)?;
    let to = amount_value(to_amount)?;
    if from <= 0.0 {
        return None;
    }
    Some(format!("{:.6}", to / from))
}

/// Minimum acceptable output after slippage.
///
/// `slippage_percent` is converted to basis points and clamped to `0..=100%`.
pub fn apply_slippage(raw: U256, slippage_percent: f64) -> U256 {
    let bps = if slippage_percent.is_finite() && slippage_percent > 0.0 {
        ((slippage_percent * 100.0).round() as u64).min(10_000)
    } else {
        0
    };
    let keep = U256::from(10_000 - bps);
    let denom = U256::from(10_000u64);
    // split to avoid overflowing raw * keep
    (raw / denom) * keep + (raw % denom) * keep / denom
}
