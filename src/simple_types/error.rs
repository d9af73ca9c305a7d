//! Validation and construction error types

use thiserror::Error;

/// A structurally invalid input value
///
/// Raised when a line item is rejected. Holds the path of the offending
/// field and a message.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::simple_types::ValidationError;
///
/// let error = ValidationError::new("items[0].quantity", "Must be greater than 0");
/// assert_eq!(error.field_name, "items[0].quantity");
/// assert_eq!(error.to_string(), "items[0].quantity: Must be greater than 0");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{field_name}: {message}")]
pub struct ValidationError {
    /// Path of the field where the error occurred
    pub field_name: String,
    /// Error message
    pub message: String,
}

impl ValidationError {
    /// Creates a new `ValidationError`
    #[must_use]
    pub fn new(field_name: &str, message: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            message: message.to_string(),
        }
    }

    /// Returns the same error with `prefix` prepended to the field path
    ///
    /// ```
    /// use pricing_pipeline::simple_types::ValidationError;
    ///
    /// let error = ValidationError::new("sku", "Must not be empty").within("items[3]");
    /// assert_eq!(error.field_name, "items[3].sku");
    /// ```
    #[must_use]
    pub fn within(self, prefix: &str) -> Self {
        Self {
            field_name: format!("{prefix}.{}", self.field_name),
            message: self.message,
        }
    }
}

/// A stage built with an invalid static parameter
///
/// Raised eagerly by stage constructors, never at calculation time.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::simple_types::ConstructionError;
///
/// let error = ConstructionError::new("flat_discount", "Amount must not be negative");
/// assert_eq!(error.stage(), "flat_discount");
/// assert_eq!(error.to_string(), "flat_discount: Amount must not be negative");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{stage}: {message}")]
pub struct ConstructionError {
    stage: String,
    message: String,
}

impl ConstructionError {
    /// Creates a new `ConstructionError`
    #[must_use]
    pub fn new(stage: &str, message: &str) -> Self {
        Self {
            stage: stage.to_string(),
            message: message.to_string(),
        }
    }

    /// Name of the stage that refused its parameters
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
