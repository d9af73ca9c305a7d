//! Fixed-amount discount stage

use rust_decimal::Decimal;

use super::error::PricingResult;
use super::stage::{BoxedStage, PricingStage, evaluate_wrapped};
use crate::order::OrderSnapshot;
use crate::simple_types::ConstructionError;

/// Subtracts a fixed amount from the running total, floored at zero
///
/// A negative amount would turn the discount into a surcharge, so it is
/// refused when the stage is built.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{BaseCalculator, FlatDiscountStage, PricingStage};
/// use rust_decimal::Decimal;
///
/// let order = OrderSnapshot::new(vec![LineItem::new("W1", 1, Decimal::from(30))], ShippingMethod::Standard);
///
/// let stage = FlatDiscountStage::new(BaseCalculator::new(), Decimal::from(10)).unwrap();
/// assert_eq!(stage.calculate(&order).unwrap(), Decimal::from(20));
///
/// assert!(FlatDiscountStage::new(BaseCalculator::new(), Decimal::NEGATIVE_ONE).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct FlatDiscountStage<Inner = BoxedStage> {
    inner: Inner,
    amount: Decimal,
}

impl<Inner: PricingStage> FlatDiscountStage<Inner> {
    /// Stage name reported in breakdowns
    pub const NAME: &'static str = "flat_discount";

    /// # Errors
    ///
    /// Returns [`ConstructionError`] when `amount` is negative.
    pub fn new(inner: Inner, amount: Decimal) -> Result<Self, ConstructionError> {
        if amount < Decimal::ZERO {
            return Err(ConstructionError::new(
                Self::NAME,
                &format!("Amount must not be negative, got {amount}"),
            ));
        }
        Ok(Self { inner, amount })
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

impl<Inner: PricingStage> PricingStage for FlatDiscountStage<Inner> {
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
            Ok((upstream - self.amount).max(Decimal::ZERO))
        })
    }
}
