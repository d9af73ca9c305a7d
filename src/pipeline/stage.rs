//! The pricing stage abstraction
//!
//! A stage turns an order snapshot into a total. Every stage except
//! [`BaseCalculator`](super::BaseCalculator) owns exactly one inner stage:
//! it asks the inner stage for the running total, transforms it, and hands
//! the result outward. The outermost stage is therefore applied last.
//!
//! ```text
//! Coupon( Tax( Shipping( Base ) ) )
//!   calculate ──► ──► ──► items sum
//!   total     ◄── ◄── ◄── subtotal
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::{PricingError, PricingResult};
use crate::order::OrderSnapshot;
use crate::simple_types::ValidationError;

/// A type-erased stage, the default inner stage of every wrapper
pub type BoxedStage = Box<dyn PricingStage>;

/// One link of the pricing chain
///
/// Stages hold only parameters fixed at construction, so a chain can be
/// reused for any number of orders and shared across threads.
pub trait PricingStage: Send + Sync {
    /// Short identifier used in logs and breakdowns
    fn name(&self) -> &'static str;

    /// The wrapped stage, `None` for the innermost one
    fn inner(&self) -> Option<&dyn PricingStage>;

    /// Computes this stage's total, reporting every stage's output to
    /// `observer` from the innermost outward
    ///
    /// # Errors
    ///
    /// Returns the first error raised anywhere in the chain.
    fn evaluate(
        &self,
        order: &OrderSnapshot,
        observer: &mut dyn FnMut(&'static str, Decimal),
    ) -> PricingResult<Decimal>;

    /// Computes this stage's total
    ///
    /// # Errors
    ///
    /// See [`PricingStage::evaluate`].
    fn calculate(&self, order: &OrderSnapshot) -> PricingResult<Decimal> {
        self.evaluate(order, &mut |_: &'static str, _: Decimal| {})
    }
}

impl<S: PricingStage + ?Sized> PricingStage for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn inner(&self) -> Option<&dyn PricingStage> {
        (**self).inner()
    }

    fn evaluate(
        &self,
        order: &OrderSnapshot,
        observer: &mut dyn FnMut(&'static str, Decimal),
    ) -> PricingResult<Decimal> {
        (**self).evaluate(order, observer)
    }

    fn calculate(&self, order: &OrderSnapshot) -> PricingResult<Decimal> {
        (**self).calculate(order)
    }
}

/// Running total recorded after one stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StageTotal {
    /// Stage name
    pub stage: &'static str,
    /// Total after the stage was applied
    pub total: Decimal,
}

/// Error for a stage whose adjusted total leaves the `Decimal` range
pub(crate) fn total_overflow(stage: &'static str) -> PricingError {
    ValidationError::new("total", "Overflows the decimal range")
        .within(stage)
        .into()
}

/// Shared body of every wrapping stage: run the inner stage, adjust its
/// total, report and return the result.
pub(crate) fn evaluate_wrapped<Inner, Adjust>(
    inner: &Inner,
    name: &'static str,
    order: &OrderSnapshot,
    observer: &mut dyn FnMut(&'static str, Decimal),
    adjust: Adjust,
) -> PricingResult<Decimal>
where
    Inner: PricingStage + ?Sized,
    Adjust: FnOnce(Decimal) -> PricingResult<Decimal>,
{
    let upstream = inner.evaluate(order, observer)?;
    let total = adjust(upstream)?;
    tracing::debug!(stage = name, %upstream, %total, "stage applied");
    observer(name, total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Fixed(Decimal);

    impl PricingStage for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn inner(&self) -> Option<&dyn PricingStage> {
            None
        }

        fn evaluate(
            &self,
            _order: &OrderSnapshot,
            observer: &mut dyn FnMut(&'static str, Decimal),
        ) -> PricingResult<Decimal> {
            observer(self.name(), self.0);
            Ok(self.0)
        }
    }

    #[rstest]
    fn test_boxed_stage_forwards() {
        let stage: BoxedStage = Box::new(Fixed(Decimal::from(7)));
        let order = OrderSnapshot::default();

        assert_eq!(stage.name(), "fixed");
        assert_eq!(stage.calculate(&order).unwrap(), Decimal::from(7));
    }

    #[rstest]
    fn test_evaluate_wrapped_reports_inner_then_outer() {
        let inner = Fixed(Decimal::from(10));
        let order = OrderSnapshot::default();
        let mut seen = Vec::new();

        let total = evaluate_wrapped(
            &inner,
            "double",
            &order,
            &mut |stage: &'static str, total: Decimal| seen.push(StageTotal { stage, total }),
            |upstream| Ok(upstream * Decimal::TWO),
        )
        .unwrap();

        assert_eq!(total, Decimal::from(20));
        assert_eq!(
            seen,
            vec![
                StageTotal {
                    stage: "fixed",
                    total: Decimal::from(10)
                },
                StageTotal {
                    stage: "double",
                    total: Decimal::from(20)
                },
            ]
        );
    }

    #[rstest]
    fn test_evaluate_wrapped_stops_on_failed_adjust() {
        let inner = Fixed(Decimal::MAX);
        let order = OrderSnapshot::default();
        let mut seen = Vec::new();

        let error = evaluate_wrapped(
            &inner,
            "double",
            &order,
            &mut |stage: &'static str, _total: Decimal| seen.push(stage),
            |upstream| upstream.checked_mul(Decimal::TWO).ok_or_else(|| total_overflow("double")),
        )
        .unwrap_err();

        assert_eq!(
            error.to_string(),
            "Validation error: double.total: Overflows the decimal range"
        );
        assert_eq!(seen, ["fixed"]);
    }
}
