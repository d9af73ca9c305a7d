//! Runtime assembly of a pipeline from an ordered list of stage specs

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::base::BaseCalculator;
use super::coupon::CouponPercentStage;
use super::discount::FlatDiscountStage;
use super::error::PricingResult;
use super::rounding::RoundingStage;
use super::shipping::ShippingFeeStage;
use super::stage::{BoxedStage, PricingStage, StageTotal};
use super::tax::{RateProvider, TaxStage, flat_rate};
use crate::order::OrderSnapshot;

// =============================================================================
// StageSpec
// =============================================================================

/// Description of one wrapping stage, built by [`build_pipeline`]
#[derive(Clone)]
pub enum StageSpec {
    /// [`ShippingFeeStage`]
    Shipping,

    /// [`TaxStage`] with a caller-supplied provider
    Tax {
        /// Rate of each order, clamped into `[0, 1]`
        provider: RateProvider,
    },

    /// [`TaxStage`] with the same rate for every order
    FlatTax {
        /// Rate, clamped into `[0, 1]`
        rate: Decimal,
    },

    /// [`CouponPercentStage`]
    Coupon {
        /// Fraction taken off, clamped into `[0, 1]`
        percent: Decimal,
    },

    /// [`FlatDiscountStage`]
    FlatDiscount {
        /// Amount taken off; must not be negative
        amount: Decimal,
    },

    /// [`RoundingStage`]
    Rounding {
        /// Decimal places kept
        scale: u32,
    },
}

impl StageSpec {
    /// Wraps `inner` in the stage this spec describes
    ///
    /// # Errors
    ///
    /// Returns a construction error for a negative discount or an
    /// out-of-range rounding scale.
    pub fn wrap(self, inner: BoxedStage) -> PricingResult<BoxedStage> {
        let stage: BoxedStage = match self {
            Self::Shipping => Box::new(ShippingFeeStage::new(inner)),
            Self::Tax { provider } => Box::new(TaxStage::new(inner, provider)),
            Self::FlatTax { rate } => Box::new(TaxStage::new(inner, flat_rate(rate))),
            Self::Coupon { percent } => Box::new(CouponPercentStage::new(inner, percent)),
            Self::FlatDiscount { amount } => Box::new(FlatDiscountStage::new(inner, amount)?),
            Self::Rounding { scale } => Box::new(RoundingStage::new(inner, scale)?),
        };
        Ok(stage)
    }
}

impl fmt::Debug for StageSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shipping => formatter.write_str("Shipping"),
            Self::Tax { .. } => formatter.debug_struct("Tax").finish_non_exhaustive(),
            Self::FlatTax { rate } => formatter.debug_struct("FlatTax").field("rate", rate).finish(),
            Self::Coupon { percent } => formatter
                .debug_struct("Coupon")
                .field("percent", percent)
                .finish(),
            Self::FlatDiscount { amount } => formatter
                .debug_struct("FlatDiscount")
                .field("amount", amount)
                .finish(),
            Self::Rounding { scale } => formatter
                .debug_struct("Rounding")
                .field("scale", scale)
                .finish(),
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Totals recorded while pricing one order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    /// Running total after each stage, innermost first
    pub steps: Vec<StageTotal>,
    /// Final total, equal to the last step
    pub total: Decimal,
}

fn format_amount(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{cents:.2}")
}

/// One `stage  amount` row per step, then a `TOTAL` row, amounts in cents
impl fmt::Display for Breakdown {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(formatter, "{:<14} {:>12}", step.stage, format_amount(step.total))?;
        }
        write!(formatter, "{:<14} {:>12}", "TOTAL", format_amount(self.total))
    }
}

/// A fully assembled chain of stages, ready to price orders
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{StageSpec, build_pipeline};
/// use rust_decimal::Decimal;
///
/// let pipeline = build_pipeline([
///     StageSpec::Shipping,
///     StageSpec::FlatTax { rate: Decimal::new(8, 2) },
///     StageSpec::Coupon { percent: Decimal::new(10, 2) },
/// ])
/// .unwrap();
///
/// let order = OrderSnapshot::new(
///     vec![LineItem::new("W1234", 2, Decimal::from(100)), LineItem::new("G123", 1, Decimal::from(100))],
///     ShippingMethod::Express,
/// );
///
/// assert_eq!(pipeline.calculate(&order).unwrap(), Decimal::new(30618, 2));
/// assert_eq!(pipeline.stage_names(), ["base", "shipping", "tax", "coupon"]);
/// ```
pub struct Pipeline {
    root: BoxedStage,
    stage_names: Vec<&'static str>,
}

impl Pipeline {
    /// Wraps an already composed chain
    pub fn new(root: impl PricingStage + 'static) -> Self {
        let mut stage_names: Vec<&'static str> =
            std::iter::successors(Some(&root as &dyn PricingStage), |stage| stage.inner())
                .map(|stage| stage.name())
                .collect();
        stage_names.reverse();
        Self {
            root: Box::new(root),
            stage_names,
        }
    }

    /// Prices `order`
    ///
    /// # Errors
    ///
    /// Returns the first validation error raised by the base calculator;
    /// no partial total is produced.
    pub fn calculate(&self, order: &OrderSnapshot) -> PricingResult<Decimal> {
        let span = tracing::debug_span!(
            "calculate",
            items = order.items().len(),
            shipping_method = ?order.shipping_method(),
        );
        let _guard = span.enter();

        self.root.calculate(order).inspect_err(|error| {
            tracing::warn!(%error, "pricing aborted");
        })
    }

    /// Prices `order`, recording the running total after every stage
    ///
    /// # Errors
    ///
    /// See [`Pipeline::calculate`].
    pub fn calculate_with_breakdown(&self, order: &OrderSnapshot) -> PricingResult<Breakdown> {
        let span = tracing::debug_span!("calculate_with_breakdown", items = order.items().len());
        let _guard = span.enter();

        let mut steps = Vec::with_capacity(self.stage_names.len());
        let total = self
            .root
            .evaluate(order, &mut |stage: &'static str, total: Decimal| {
                steps.push(StageTotal { stage, total });
            })
            .inspect_err(|error| {
                tracing::warn!(%error, "pricing aborted");
            })?;

        Ok(Breakdown { steps, total })
    }

    /// Stage names, innermost first
    #[must_use]
    pub fn stage_names(&self) -> &[&'static str] {
        &self.stage_names
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("stages", &self.stage_names)
            .finish()
    }
}

/// Builds a pipeline from specs listed innermost first
///
/// The base calculator is always the innermost stage and is not listed.
/// Parameters are checked here, before any order is priced.
///
/// # Errors
///
/// Returns the construction error of the first invalid spec.
pub fn build_pipeline(specs: impl IntoIterator<Item = StageSpec>) -> PricingResult<Pipeline> {
    let root = specs
        .into_iter()
        .try_fold(Box::new(BaseCalculator::new()) as BoxedStage, |inner, spec| {
            spec.wrap(inner)
        })?;
    let pipeline = Pipeline::new(root);
    tracing::debug!(stages = ?pipeline.stage_names(), "pipeline built");
    Ok(pipeline)
}

/// Prices `order` with `pipeline`
///
/// # Errors
///
/// See [`Pipeline::calculate`].
pub fn calculate(pipeline: &Pipeline, order: &OrderSnapshot) -> PricingResult<Decimal> {
    pipeline.calculate(order)
}
