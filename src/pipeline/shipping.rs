//! Flat shipping fee stage

use rust_decimal::Decimal;

use super::error::PricingResult;
use super::stage::{BoxedStage, PricingStage, evaluate_wrapped, total_overflow};
use crate::order::OrderSnapshot;

/// Adds the flat fee of the order's shipping method
///
/// | Method | Fee |
/// |--------|-----|
/// | Standard | 5 |
/// | Express | 15 |
///
/// The fee does not depend on the items.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{BaseCalculator, PricingStage, ShippingFeeStage};
/// use rust_decimal::Decimal;
///
/// let stage = ShippingFeeStage::new(BaseCalculator::new());
/// let order = OrderSnapshot::new(vec![LineItem::new("W1", 1, Decimal::from(20))], ShippingMethod::Express);
///
/// assert_eq!(stage.calculate(&order).unwrap(), Decimal::from(35));
/// ```
#[derive(Clone, Debug)]
pub struct ShippingFeeStage<Inner = BoxedStage> {
    inner: Inner,
}

impl<Inner: PricingStage> ShippingFeeStage<Inner> {
    /// Stage name reported in breakdowns
    pub const NAME: &'static str = "shipping";

    #[must_use]
    pub const fn new(inner: Inner) -> Self {
        Self { inner }
    }
}

impl<Inner: PricingStage> PricingStage for ShippingFeeStage<Inner> {
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
        let fee = order.shipping_method().flat_fee();
        evaluate_wrapped(&self.inner, Self::NAME, order, observer, |upstream| {
            upstream
                .checked_add(fee)
                .ok_or_else(|| total_overflow(Self::NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{LineItem, ShippingMethod};
    use crate::pipeline::BaseCalculator;
    use rstest::rstest;

    #[rstest]
    #[case(ShippingMethod::Standard, 5)]
    #[case(ShippingMethod::Express, 15)]
    fn test_adds_flat_fee_to_empty_order(#[case] method: ShippingMethod, #[case] fee: i64) {
        let stage = ShippingFeeStage::new(BaseCalculator::new());

        let total = stage.calculate(&OrderSnapshot::empty(method)).unwrap();

        assert_eq!(total, Decimal::from(fee));
    }

    #[rstest]
    #[case(vec![LineItem::new("W1", 1, Decimal::ONE)])]
    #[case(vec![LineItem::new("W1", 40, Decimal::from(250)), LineItem::new("G1", 2, Decimal::new(5, 2))])]
    fn test_fee_independent_of_items(#[case] items: Vec<LineItem>) {
        let order = OrderSnapshot::new(items, ShippingMethod::Express);
        let base = BaseCalculator::new().calculate(&order).unwrap();

        let total = ShippingFeeStage::new(BaseCalculator::new())
            .calculate(&order)
            .unwrap();

        assert_eq!(total - base, Decimal::from(15));
    }

    #[rstest]
    fn test_propagates_inner_failure() {
        let order = OrderSnapshot::new(
            vec![LineItem::new("W1", 0, Decimal::ONE)],
            ShippingMethod::Standard,
        );

        let result = ShippingFeeStage::new(BaseCalculator::new()).calculate(&order);

        assert!(result.unwrap_err().is_validation());
    }

    #[rstest]
    #[case(ShippingMethod::Standard)]
    #[case(ShippingMethod::Express)]
    fn test_fee_past_decimal_max_is_rejected(#[case] method: ShippingMethod) {
        let order = OrderSnapshot::new(vec![LineItem::create("W1", 1, Decimal::MAX).unwrap()], method);

        let error = ShippingFeeStage::new(BaseCalculator::new())
            .calculate(&order)
            .unwrap_err();

        assert!(error.is_validation());
        assert_eq!(
            error.to_string(),
            "Validation error: shipping.total: Overflows the decimal range"
        );
    }

    #[rstest]
    fn test_fee_up_to_decimal_max_is_accepted() {
        let price = Decimal::MAX - Decimal::from(15);
        let order = OrderSnapshot::new(
            vec![LineItem::create("W1", 1, price).unwrap()],
            ShippingMethod::Express,
        );

        let total = ShippingFeeStage::new(BaseCalculator::new())
            .calculate(&order)
            .unwrap();

        assert_eq!(total, Decimal::MAX);
    }
}
