//! Column decoding helpers shared by the row models.

use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use outlays_core::errors::Error;
use outlays_core::Result;

/// Parses a TEXT money column. Corrupt values are an error, never zero.
pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        error!("Failed to parse {} '{}' as decimal: {}", column, value, e);
        StorageError::SerializationError(format!("invalid decimal in {}: {}", column, e)).into()
    })
}

/// Parses a TEXT enum column through the domain type's `FromStr`.
pub(crate) fn parse_column<T>(value: &str, column: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    T::from_str(value).map_err(|e| {
        error!("Unexpected value '{}' in column {}: {}", value, column, e);
        StorageError::SerializationError(format!("invalid {}: {}", column, value)).into()
    })
}
