//! Helper functions for checking and constraining primitive values
//!
//! Each checker returns the value unchanged on success so that callers can
//! chain them with `?`.

use rust_decimal::Decimal;

use super::error::ValidationError;

/// Checks that a string is non-empty and at most `max_length` chars
///
/// # Errors
///
/// Returns [`ValidationError`] when the input is empty or too long.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::simple_types::constrained_type::check_string;
///
/// assert!(check_string("sku", 8, "W1234").is_ok());
/// assert!(check_string("sku", 8, "").is_err());
/// assert!(check_string("sku", 3, "W1234").is_err());
/// ```
pub fn check_string<'a>(
    field_name: &str,
    max_length: usize,
    value: &'a str,
) -> Result<&'a str, ValidationError> {
    if value.is_empty() {
        Err(ValidationError::new(field_name, "Must not be empty"))
    } else if value.chars().count() > max_length {
        Err(ValidationError::new(
            field_name,
            &format!("Must not be more than {max_length} chars"),
        ))
    } else {
        Ok(value)
    }
}

/// Checks that an integer is strictly positive
///
/// # Errors
///
/// Returns [`ValidationError`] when the input is zero or negative.
pub fn check_positive_integer(field_name: &str, value: i64) -> Result<i64, ValidationError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ValidationError::new(
            field_name,
            &format!("Must be greater than 0, got {value}"),
        ))
    }
}

/// Checks that a decimal is zero or greater
///
/// # Errors
///
/// Returns [`ValidationError`] when the input is negative.
pub fn check_non_negative_decimal(
    field_name: &str,
    value: Decimal,
) -> Result<Decimal, ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::new(
            field_name,
            &format!("Must not be negative, got {value}"),
        ))
    } else {
        Ok(value)
    }
}

/// Constrains a decimal into `[min_value, max_value]`
///
/// Returns the constrained value and whether it differed from the input.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::simple_types::constrained_type::clamp_decimal;
/// use rust_decimal::Decimal;
///
/// let (value, clamped) = clamp_decimal(Decimal::new(15, 1), Decimal::ZERO, Decimal::ONE);
/// assert_eq!(value, Decimal::ONE);
/// assert!(clamped);
/// ```
#[must_use]
pub fn clamp_decimal(value: Decimal, min_value: Decimal, max_value: Decimal) -> (Decimal, bool) {
    let constrained = value.clamp(min_value, max_value);
    (constrained, constrained != value)
}

/// Constrains a rate or percentage into `[0, 1]`
#[must_use]
pub fn clamp_unit_interval(value: Decimal) -> (Decimal, bool) {
    clamp_decimal(value, Decimal::ZERO, Decimal::ONE)
}
