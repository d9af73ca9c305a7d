//! Primitive checks and error types shared by the order and pipeline modules
//!
//! # Type list
//!
//! - [`ValidationError`] - a structurally invalid line item
//! - [`ConstructionError`] - a stage built with an invalid parameter
//! - [`constrained_type`] - range and emptiness checkers, clamping helpers

pub mod constrained_type;
mod error;

pub use error::{ConstructionError, ValidationError};
