//! Percentage coupon stage

use rust_decimal::Decimal;

use super::error::PricingResult;
use super::stage::{BoxedStage, PricingStage, evaluate_wrapped};
use crate::order::OrderSnapshot;
use crate::simple_types::constrained_type::clamp_unit_interval;

/// Takes `percent` off the running total, never going below zero
///
/// `percent` is a fraction (`0.10` is ten percent) and is clamped into
/// `[0, 1]` when the stage is built.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{BaseCalculator, CouponPercentStage, PricingStage};
/// use rust_decimal::Decimal;
///
/// let order = OrderSnapshot::new(vec![LineItem::new("W1", 1, Decimal::from(80))], ShippingMethod::Standard);
/// let stage = CouponPercentStage::new(BaseCalculator::new(), Decimal::new(25, 2));
///
/// assert_eq!(stage.calculate(&order).unwrap(), Decimal::from(60));
/// ```
#[derive(Clone, Debug)]
pub struct CouponPercentStage<Inner = BoxedStage> {
    inner: Inner,
    percent: Decimal,
}

impl<Inner: PricingStage> CouponPercentStage<Inner> {
    /// Stage name reported in breakdowns
    pub const NAME: &'static str = "coupon";

    #[must_use]
    pub fn new(inner: Inner, percent: Decimal) -> Self {
        let (clamped_percent, clamped) = clamp_unit_interval(percent);
        if clamped {
            tracing::warn!(requested = %percent, percent = %clamped_percent, "coupon percent out of range, clamped");
        }
        Self {
            inner,
            percent: clamped_percent,
        }
    }

    /// The percent actually applied, after clamping
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.percent
    }
}

impl<Inner: PricingStage> PricingStage for CouponPercentStage<Inner> {
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
            Ok((upstream - upstream * self.percent).max(Decimal::ZERO))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{LineItem, ShippingMethod};
    use crate::pipeline::BaseCalculator;
    use rstest::rstest;

    fn order_totaling(amount: i64) -> OrderSnapshot {
        OrderSnapshot::new(
            vec![LineItem::new("W1", 1, Decimal::from(amount))],
            ShippingMethod::Standard,
        )
    }

    #[rstest]
    #[case(Decimal::new(10, 2), Decimal::new(10, 2))]
    #[case(Decimal::new(-3, 1), Decimal::ZERO)]
    #[case(Decimal::from(2), Decimal::ONE)]
    fn test_percent_clamped_at_construction(#[case] requested: Decimal, #[case] expected: Decimal) {
        let stage = CouponPercentStage::new(BaseCalculator::new(), requested);

        assert_eq!(stage.percent(), expected);
    }

    #[rstest]
    fn test_full_coupon_on_zero_total_is_zero() {
        let stage = CouponPercentStage::new(BaseCalculator::new(), Decimal::ONE);

        let total = stage
            .calculate(&OrderSnapshot::empty(ShippingMethod::Standard))
            .unwrap();

        assert_eq!(total, Decimal::ZERO);
        assert!(total >= Decimal::ZERO);
    }

    #[rstest]
    fn test_full_coupon_zeroes_total() {
        let stage = CouponPercentStage::new(BaseCalculator::new(), Decimal::ONE);

        assert_eq!(stage.calculate(&order_totaling(300)).unwrap(), Decimal::ZERO);
    }

    #[rstest]
    fn test_over_hundred_percent_does_not_go_negative() {
        let stage = CouponPercentStage::new(BaseCalculator::new(), Decimal::from(3));

        assert_eq!(stage.calculate(&order_totaling(50)).unwrap(), Decimal::ZERO);
    }

    #[rstest]
    fn test_ten_percent() {
        let stage = CouponPercentStage::new(BaseCalculator::new(), Decimal::new(10, 2));

        assert_eq!(stage.calculate(&order_totaling(315)).unwrap(), Decimal::new(2835, 1));
    }
}
