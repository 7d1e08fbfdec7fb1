//! Field validation shared by the creation inputs.
//!
//! Negative money or hours, empty required text and dates outside the
//! four-digit year range are rejected here, before anything reaches a store.
//! Nothing is clamped or coerced.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Rejects a required text field that is empty or only whitespace.
pub fn require_text(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::Validation {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

/// Rejects a decimal below zero.
pub fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::Validation {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        });
    }
    Ok(())
}

/// Earliest year a stored date may carry.
pub const MIN_YEAR: i32 = 0;
/// Latest year a stored date may carry.
pub const MAX_YEAR: i32 = 9999;

/// Rejects a date whose year needs more than four digits or a sign.
///
/// Stored dates compare as `YYYY-MM-DD` text, which only orders correctly
/// inside this range.
pub fn require_storable_date(field: &str, value: NaiveDate) -> EngineResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&value.year()) {
        return Err(EngineError::Validation {
            field: field.to_string(),
            message: format!(
                "year must be between {:04} and {} (got {})",
                MIN_YEAR, MAX_YEAR, value
            ),
        });
    }
    Ok(())
}

/// Turns blank optional text into `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
