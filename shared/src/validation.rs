//! Validation of user input before it reaches a contract call.

use alloy_primitives::Address;
use lazy_regex::regex_is_match;
use thiserror::Error;

use crate::units::amount_value;

/// Largest custom slippage accepted, in percent.
pub const MAX_SLIPPAGE_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: String, available: String },

    #[error("Please enter a valid Ethereum address")]
    InvalidAddress(String),

    #[error("Select a token")]
    MissingToken,

    #[error("Cannot trade a token for itself")]
    SameToken,

    #[error("Slippage must be between 0 and 50%")]
    SlippageOutOfRange,

    #[error("Deadline must be a whole number of minutes greater than zero")]
    InvalidDeadline,
}

/// `0x` followed by exactly 40 hex digits. Checksums are not enforced.
pub fn is_address(input: &str) -> bool {
    regex_is_match!(r"^0x[a-fA-F0-9]{40}$", input)
}

/// Recipient exactly as typed; surrounding whitespace is an invalid address.
pub fn validate_recipient(input: &str) -> Result<Address, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::MissingField("Recipient"));
    }
    if !is_address(input) {
        return Err(ValidationError::InvalidAddress(input.to_string()));
    }
    input
        .parse::<Address>()
        .map_err(|_| ValidationError::InvalidAddress(input.to_string()))
}

/// Amount must parse and be strictly positive.
pub fn validate_positive_amount(input: &str) -> Result<f64, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::MissingField("Amount"));
    }
    let value =
        amount_value(input).ok_or_else(|| ValidationError::InvalidAmount(input.to_string()))?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(value)
}

/// Positive amount that does not exceed the cached `balance`.
pub fn validate_amount(input: &str, balance: &str) -> Result<f64, ValidationError> {
    let value = validate_positive_amount(input)?;
    let available = amount_value(balance).unwrap_or(0.0);
    if value > available {
        return Err(ValidationError::InsufficientBalance {
            requested: input.to_string(),
            available: if balance.is_empty() {
                "0".to_string()
            } else {
                balance.to_string()
            },
        });
    }
    Ok(value)
}

pub fn validate_slippage(percent: f64) -> Result<f64, ValidationError> {
    if !percent.is_finite() || !(0.0..=MAX_SLIPPAGE_PERCENT).contains(&percent) {
        return Err(ValidationError::SlippageOutOfRange);
    }
    Ok(percent)
}

/// Parse the custom slippage field. An empty field is not an error, it just
/// means no custom value.
pub fn parse_custom_slippage(input: &str) -> Result<Option<f64>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let value = amount_value(input).ok_or(ValidationError::SlippageOutOfRange)?;
    validate_slippage(value).map(Some)
}

pub fn validate_deadline(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ValidationError::InvalidDeadline),
    }
}
