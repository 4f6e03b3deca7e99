//! Fixed-point currency helpers.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::AMOUNT_DECIMAL_PRECISION;
use crate::errors::{Error, Result};

/// Rounds an amount to the stored precision, half away from zero.
pub fn normalize_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        AMOUNT_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Parses a stored decimal string.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(raw.trim())?)
}

pub fn require_positive(field: &str, value: Decimal) -> Result<Decimal> {
    let value = normalize_amount(value);
    if value <= Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "{} must be greater than zero",
            field
        )));
    }
    Ok(value)
}

pub fn require_non_negative(field: &str, value: Decimal) -> Result<Decimal> {
    let value = normalize_amount(value);
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::invalid_input(format!("{} cannot be negative", field)));
    }
    Ok(value)
}
