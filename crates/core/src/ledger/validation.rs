//! Input validation for aggregation snapshots.
//!
//! Validation is all-or-nothing: the first violated constraint aborts the
//! whole computation and names the offending field.

use rust_decimal::Decimal;
use tally_shared::AppError;
use thiserror::Error;

use super::record::Record;
use crate::currency::INTERNAL_SCALE;

/// A caller-supplied value violates its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid input: {field} {reason}")]
pub struct InvalidInputError {
    /// Path of the offending field, e.g. `records[3].amount`.
    pub field: String,
    /// What the constraint is.
    pub reason: String,
}

impl InvalidInputError {
    /// Creates a new error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        "INVALID_INPUT"
    }
}

impl From<InvalidInputError> for AppError {
    fn from(err: InvalidInputError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Requires `value > 0`.
///
/// # Errors
///
/// Returns `InvalidInputError` naming `field` otherwise.
pub fn require_positive(field: impl FnOnce() -> String, value: Decimal) -> Result<(), InvalidInputError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(InvalidInputError::new(
            field(),
            format!("must be positive, got {value}"),
        ))
    }
}

/// Requires `value` to carry at most [`INTERNAL_SCALE`] significant
/// fractional digits. Trailing zeros do not count.
///
/// # Errors
///
/// Returns `InvalidInputError` naming `field` otherwise.
pub fn require_precision(field: impl FnOnce() -> String, value: Decimal) -> Result<(), InvalidInputError> {
    if value.normalize().scale() <= INTERNAL_SCALE {
        Ok(())
    } else {
        Err(InvalidInputError::new(
            field(),
            format!("must have at most {INTERNAL_SCALE} decimal places, got {value}"),
        ))
    }
}

/// Validates a single record at position `index` of the snapshot.
///
/// # Errors
///
/// Returns an error for a non-positive amount, rate, or override rate, and
/// for an amount finer than [`INTERNAL_SCALE`] places.
pub fn validate_record(index: usize, record: &Record) -> Result<(), InvalidInputError> {
    require_positive(|| format!("records[{index}].amount"), record.amount)?;
    require_precision(|| format!("records[{index}].amount"), record.amount)?;
    require_positive(|| format!("records[{index}].rate"), record.rate)?;
    if let Some(rate) = record.fx_override {
        require_positive(|| format!("records[{index}].fx_override"), rate)?;
    }
    Ok(())
}
