//! Fluent chaining of stages
//!
//! Reads innermost first, the same order the stages are applied in:
//!
//! ```
//! use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
//! use pricing_pipeline::pipeline::{BaseCalculator, PricingStage, StageExt};
//! use rust_decimal::Decimal;
//!
//! let stage = BaseCalculator::new()
//!     .with_shipping()
//!     .with_flat_tax(Decimal::new(8, 2))
//!     .with_coupon(Decimal::new(10, 2));
//!
//! let order = OrderSnapshot::new(
//!     vec![LineItem::new("W1234", 3, Decimal::from(100))],
//!     ShippingMethod::Express,
//! );
//! assert_eq!(stage.calculate(&order).unwrap(), Decimal::new(30618, 2));
//! ```

use rust_decimal::Decimal;

use super::coupon::CouponPercentStage;
use super::discount::FlatDiscountStage;
use super::error::PricingResult;
use super::rounding::RoundingStage;
use super::shipping::ShippingFeeStage;
use super::stage::{BoxedStage, PricingStage};
use super::tax::{RateProvider, TaxStage};

/// Wraps `self` in another stage
pub trait StageExt: PricingStage + Sized {
    /// Adds the shipping method's flat fee
    fn with_shipping(self) -> ShippingFeeStage<Self> {
        ShippingFeeStage::new(self)
    }

    /// Applies tax at the rate `rate_provider` picks for each order
    fn with_tax(self, rate_provider: RateProvider) -> TaxStage<Self> {
        TaxStage::new(self, rate_provider)
    }

    /// Applies tax at the same rate for every order
    fn with_flat_tax(self, rate: Decimal) -> TaxStage<Self> {
        TaxStage::with_flat_rate(self, rate)
    }

    /// Takes `percent` off, clamped into `[0, 1]`
    fn with_coupon(self, percent: Decimal) -> CouponPercentStage<Self> {
        CouponPercentStage::new(self, percent)
    }

    /// Subtracts a fixed `amount`, floored at zero
    ///
    /// # Errors
    ///
    /// Fails with a construction error when `amount` is negative.
    fn with_flat_discount(self, amount: Decimal) -> PricingResult<FlatDiscountStage<Self>> {
        Ok(FlatDiscountStage::new(self, amount)?)
    }

    /// Rounds to `scale` decimal places
    ///
    /// # Errors
    ///
    /// Fails with a construction error when `scale` is out of range.
    fn rounded_to(self, scale: u32) -> PricingResult<RoundingStage<Self>> {
        Ok(RoundingStage::new(self, scale)?)
    }

    /// Rounds to two decimal places
    fn rounded_to_cents(self) -> RoundingStage<Self> {
        RoundingStage::to_cents(self)
    }

    /// Erases the concrete chain type
    fn boxed(self) -> BoxedStage
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<S: PricingStage> StageExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{LineItem, OrderSnapshot, ShippingMethod};
    use crate::pipeline::BaseCalculator;
    use rstest::rstest;

    #[rstest]
    fn test_chain_names_outermost_first() {
        let stage = BaseCalculator::new().with_shipping().with_coupon(Decimal::ONE);

        assert_eq!(stage.name(), "coupon");
    }

    #[rstest]
    fn test_flat_discount_error_lifts_to_pricing_error() {
        let result = BaseCalculator::new().with_flat_discount(Decimal::NEGATIVE_ONE);

        assert!(result.unwrap_err().is_construction());
    }

    #[rstest]
    fn test_boxed_chain_matches_static_chain() {
        let order = OrderSnapshot::new(
            vec![LineItem::new("W1", 2, Decimal::new(1234, 2))],
            ShippingMethod::Standard,
        );
        let static_chain = BaseCalculator::new()
            .with_shipping()
            .with_flat_tax(Decimal::new(7, 2))
            .rounded_to_cents();
        let boxed_chain = BaseCalculator::new()
            .boxed()
            .with_shipping()
            .boxed()
            .with_flat_tax(Decimal::new(7, 2))
            .boxed()
            .rounded_to_cents();

        assert_eq!(
            static_chain.calculate(&order).unwrap(),
            boxed_chain.calculate(&order).unwrap()
        );
    }
}
