//! JSON pipeline configuration
//!
//! ```json
//! {
//!   "stages": [
//!     { "kind": "shipping" },
//!     { "kind": "tax", "rate": "0.08" },
//!     { "kind": "coupon", "percent": "0.10" },
//!     { "kind": "rounding" }
//!   ]
//! }
//! ```
//!
//! Stages are listed innermost first; the base calculator is implicit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::builder::{Pipeline, StageSpec, build_pipeline};
use super::error::PricingResult;
use super::rounding::CENTS_SCALE;

const fn default_scale() -> u32 {
    CENTS_SCALE
}

/// One configured stage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageConfig {
    Shipping,
    Tax { rate: Decimal },
    Coupon { percent: Decimal },
    FlatDiscount { amount: Decimal },
    Rounding {
        #[serde(default = "default_scale")]
        scale: u32,
    },
}

impl From<StageConfig> for StageSpec {
    fn from(config: StageConfig) -> Self {
        match config {
            StageConfig::Shipping => Self::Shipping,
            StageConfig::Tax { rate } => Self::FlatTax { rate },
            StageConfig::Coupon { percent } => Self::Coupon { percent },
            StageConfig::FlatDiscount { amount } => Self::FlatDiscount { amount },
            StageConfig::Rounding { scale } => Self::Rounding { scale },
        }
    }
}

/// An ordered list of configured stages
///
/// The default is shipping, 8% tax, 10% coupon, then rounding to cents.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::pipeline::PipelineConfig;
///
/// let config = PipelineConfig::from_json(
///     r#"{"stages": [{"kind": "shipping"}, {"kind": "coupon", "percent": "0.5"}]}"#,
/// )
/// .unwrap();
/// let pipeline = config.build().unwrap();
///
/// assert_eq!(pipeline.stage_names(), ["base", "shipping", "coupon"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                StageConfig::Shipping,
                StageConfig::Tax {
                    rate: Decimal::new(8, 2),
                },
                StageConfig::Coupon {
                    percent: Decimal::new(10, 2),
                },
                StageConfig::Rounding {
                    scale: CENTS_SCALE,
                },
            ],
        }
    }
}

impl PipelineConfig {
    /// Parses a configuration from JSON
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] for malformed JSON, an unknown stage
    /// kind, or an unknown field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn into_specs(self) -> Vec<StageSpec> {
        self.stages.into_iter().map(StageSpec::from).collect()
    }

    /// Builds the configured pipeline
    ///
    /// # Errors
    ///
    /// Returns a construction error for an invalid stage parameter.
    pub fn build(self) -> PricingResult<Pipeline> {
        build_pipeline(self.into_specs())
    }
}
