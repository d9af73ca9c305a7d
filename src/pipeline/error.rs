//! Pipeline error type
//!
//! Every failure aborts the whole chain; no partial total is returned.

use thiserror::Error;

use crate::simple_types::{ConstructionError, ValidationError};

/// Failure of a pricing call or of building a pipeline
///
/// `From` impls let `?` lift either cause.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::pipeline::PricingError;
/// use pricing_pipeline::simple_types::ValidationError;
///
/// let error: PricingError = ValidationError::new("items[0].quantity", "Must be greater than 0").into();
/// assert!(error.is_validation());
/// assert_eq!(
///     error.to_string(),
///     "Validation error: items[0].quantity: Must be greater than 0"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A line item was structurally invalid
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// A stage was built with an invalid parameter
    #[error("Construction error: {0}")]
    Construction(ConstructionError),
}

/// Result of pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

impl PricingError {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(self, Self::Construction(_))
    }
}

impl From<ValidationError> for PricingError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<ConstructionError> for PricingError {
    fn from(error: ConstructionError) -> Self {
        Self::Construction(error)
    }
}
