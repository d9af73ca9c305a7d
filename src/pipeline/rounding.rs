//! Rounding stage

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::PricingResult;
use super::stage::{BoxedStage, PricingStage, evaluate_wrapped};
use crate::order::OrderSnapshot;
use crate::simple_types::ConstructionError;

/// Largest scale a `Decimal` can carry
pub const MAX_SCALE: u32 = 28;

/// Scale of a monetary amount in cents
pub const CENTS_SCALE: u32 = 2;

/// Rounds the running total to `scale` decimal places, half away from zero
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{BaseCalculator, PricingStage, RoundingStage, TaxStage};
/// use rust_decimal::Decimal;
///
/// let order = OrderSnapshot::new(vec![LineItem::new("W1", 1, Decimal::new(1005, 2))], ShippingMethod::Standard);
/// let taxed = TaxStage::with_flat_rate(BaseCalculator::new(), Decimal::new(5, 2));
///
/// // 10.05 * 1.05 = 10.5525
/// let rounded = RoundingStage::to_cents(taxed);
/// assert_eq!(rounded.calculate(&order).unwrap(), Decimal::new(1055, 2));
/// ```
#[derive(Clone, Debug)]
pub struct RoundingStage<Inner = BoxedStage> {
    inner: Inner,
    scale: u32,
}

impl<Inner: PricingStage> RoundingStage<Inner> {
    /// Stage name reported in breakdowns
    pub const NAME: &'static str = "rounding";

    /// # Errors
    ///
    /// Returns [`ConstructionError`] when `scale` exceeds [`MAX_SCALE`].
    pub fn new(inner: Inner, scale: u32) -> Result<Self, ConstructionError> {
        if scale > MAX_SCALE {
            return Err(ConstructionError::new(
                Self::NAME,
                &format!("Scale must not exceed {MAX_SCALE}, got {scale}"),
            ));
        }
        Ok(Self { inner, scale })
    }

    /// Rounds to two decimal places
    #[must_use]
    pub const fn to_cents(inner: Inner) -> Self {
        Self {
            inner,
            scale: CENTS_SCALE,
        }
    }

    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }
}

impl<Inner: PricingStage> PricingStage for RoundingStage<Inner> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inner(&self) -> Option<&dyn PricingStage> {
        Some(&self.inner)
    }

    fn evaluate(
        &self,
        order: &OrderSnapshot,
        observer: &mut dyn FnMut(&'static str, Decimal),
    ) -> PricingResult<Decimal> {
        evaluate_wrapped(&self.inner, Self::NAME, order, observer, |upstream| {
            Ok(upstream.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero))
        })
    }
}
