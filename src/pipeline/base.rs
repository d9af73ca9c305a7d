//! Innermost stage: sums line-item subtotals

use rust_decimal::Decimal;

use super::error::PricingResult;
use super::stage::PricingStage;
use crate::order::OrderSnapshot;
use crate::simple_types::ValidationError;

/// Sums `quantity * unit_price` over every line item
///
/// This is the point of first use of the item fields, so every item is
/// checked here before anything is summed. Any wrapping stage only runs
/// after this stage succeeded.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{BaseCalculator, PricingStage};
/// use rust_decimal::Decimal;
///
/// let order = OrderSnapshot::new(
///     vec![
///         LineItem::new("W1234", 2, Decimal::from(100)),
///         LineItem::new("G123", 1, Decimal::from(100)),
///     ],
///     ShippingMethod::Standard,
/// );
///
/// assert_eq!(BaseCalculator::new().calculate(&order).unwrap(), Decimal::from(300));
///
/// let invalid = OrderSnapshot::new(vec![LineItem::new("W1234", 0, Decimal::ONE)], ShippingMethod::Standard);
/// assert!(BaseCalculator::new().calculate(&invalid).unwrap_err().is_validation());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseCalculator;

impl BaseCalculator {
    /// Stage name reported in breakdowns
    pub const NAME: &'static str = "base";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn subtotal(order: &OrderSnapshot) -> Result<Decimal, ValidationError> {
        order
            .items()
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |accumulator, (index, item)| {
                let prefix = format!("items[{index}]");
                item.validate().map_err(|error| error.within(&prefix))?;
                item.subtotal()
                    .and_then(|subtotal| accumulator.checked_add(subtotal))
                    .ok_or_else(|| {
                        ValidationError::new("subtotal", "Overflows the decimal range")
                            .within(&prefix)
                    })
            })
    }
}

impl PricingStage for BaseCalculator {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn inner(&self) -> Option<&dyn PricingStage> {
        None
    }

    fn evaluate(
        &self,
        order: &OrderSnapshot,
        observer: &mut dyn FnMut(&'static str, Decimal),
    ) -> PricingResult<Decimal> {
        let total = Self::subtotal(order)?;
        tracing::debug!(stage = Self::NAME, items = order.items().len(), %total, "stage applied");
        observer(Self::NAME, total);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{LineItem, ShippingMethod};
    use crate::pipeline::PricingError;
    use rstest::rstest;

    fn order_of(items: Vec<LineItem>) -> OrderSnapshot {
        OrderSnapshot::new(items, ShippingMethod::Standard)
    }

    #[rstest]
    fn test_empty_order_is_zero() {
        let order = OrderSnapshot::empty(ShippingMethod::Express);

        assert_eq!(BaseCalculator::new().calculate(&order).unwrap(), Decimal::ZERO);
    }

    #[rstest]
    fn test_sums_subtotals() {
        let order = order_of(vec![
            LineItem::new("W1", 3, Decimal::new(1999, 2)),
            LineItem::new("W2", 1, Decimal::new(5, 1)),
        ]);

        assert_eq!(
            BaseCalculator::new().calculate(&order).unwrap(),
            Decimal::new(6047, 2)
        );
    }

    #[rstest]
    #[case(LineItem::new("W2", 0, Decimal::ONE), "items[1].quantity")]
    #[case(LineItem::new("W2", -1, Decimal::ONE), "items[1].quantity")]
    #[case(LineItem::new("W2", 1, Decimal::new(-1, 2)), "items[1].unit_price")]
    #[case(LineItem::new("", 1, Decimal::ONE), "items[1].sku")]
    fn test_rejects_invalid_item(#[case] invalid: LineItem, #[case] field: &str) {
        let order = order_of(vec![LineItem::new("W1", 1, Decimal::ONE), invalid]);

        let error = BaseCalculator::new().calculate(&order).unwrap_err();

        match error {
            PricingError::Validation(validation) => assert_eq!(validation.field_name, field),
            PricingError::Construction(_) => panic!("expected validation error"),
        }
    }

    #[rstest]
    fn test_rejects_overflowing_sum() {
        let order = order_of(vec![
            LineItem::new("W1", 1, Decimal::MAX),
            LineItem::new("W2", 1, Decimal::MAX),
        ]);

        let error = BaseCalculator::new().calculate(&order).unwrap_err();

        assert_eq!(
            error,
            PricingError::Validation(ValidationError::new(
                "items[1].subtotal",
                "Overflows the decimal range"
            ))
        );
    }

    #[rstest]
    fn test_observer_sees_base_total() {
        let order = order_of(vec![LineItem::new("W1", 2, Decimal::from(4))]);
        let mut seen = Vec::new();

        BaseCalculator::new()
            .evaluate(&order, &mut |stage: &'static str, total: Decimal| {
                seen.push((stage, total));
            })
            .unwrap();

        assert_eq!(seen, vec![("base", Decimal::from(8))]);
    }
}
