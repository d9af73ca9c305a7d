//! Percentage tax stage with a caller-supplied rate

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::PricingResult;
use super::stage::{BoxedStage, PricingStage, evaluate_wrapped, total_overflow};
use crate::order::OrderSnapshot;
use crate::simple_types::constrained_type::clamp_unit_interval;

/// Function deciding the tax rate of an order
///
/// Shared and thread-safe so that stages and stage specs stay cheap to clone.
pub type RateProvider = Arc<dyn Fn(&OrderSnapshot) -> Decimal + Send + Sync>;

/// A provider returning `rate` for every order
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::OrderSnapshot;
/// use pricing_pipeline::pipeline::flat_rate;
/// use rust_decimal::Decimal;
///
/// let provider = flat_rate(Decimal::new(8, 2));
/// assert_eq!(provider(&OrderSnapshot::default()), Decimal::new(8, 2));
/// ```
#[must_use]
pub fn flat_rate(rate: Decimal) -> RateProvider {
    Arc::new(move |_: &OrderSnapshot| rate)
}

/// Multiplies the running total by `1 + rate`
///
/// The rate comes from the provider and is clamped into `[0, 1]` on every
/// call: negative rates act as 0, rates above 1 act as 1. Without a provider
/// the stage passes the total through unchanged.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use pricing_pipeline::pipeline::{BaseCalculator, PricingStage, TaxStage};
/// use rust_decimal::Decimal;
///
/// let order = OrderSnapshot::new(vec![LineItem::new("W1", 1, Decimal::from(100))], ShippingMethod::Standard);
///
/// let taxed = TaxStage::with_flat_rate(BaseCalculator::new(), Decimal::new(8, 2));
/// assert_eq!(taxed.calculate(&order).unwrap(), Decimal::from(108));
///
/// let capped = TaxStage::with_flat_rate(BaseCalculator::new(), Decimal::from(5));
/// assert_eq!(capped.calculate(&order).unwrap(), Decimal::from(200));
/// ```
#[derive(Clone)]
pub struct TaxStage<Inner = BoxedStage> {
    inner: Inner,
    rate_provider: Option<RateProvider>,
}

impl<Inner: PricingStage> TaxStage<Inner> {
    /// Stage name reported in breakdowns
    pub const NAME: &'static str = "tax";

    #[must_use]
    pub fn new(inner: Inner, rate_provider: RateProvider) -> Self {
        Self {
            inner,
            rate_provider: Some(rate_provider),
        }
    }

    #[must_use]
    pub fn with_flat_rate(inner: Inner, rate: Decimal) -> Self {
        Self::new(inner, flat_rate(rate))
    }

    /// A tax stage with no provider, i.e. rate 0
    #[must_use]
    pub const fn without_provider(inner: Inner) -> Self {
        Self {
            inner,
            rate_provider: None,
        }
    }

    /// The clamped rate applied to `order`
    #[must_use]
    pub fn effective_rate(&self, order: &OrderSnapshot) -> Decimal {
        let Some(provider) = &self.rate_provider else {
            return Decimal::ZERO;
        };
        let requested = provider(order);
        let (rate, clamped) = clamp_unit_interval(requested);
        if clamped {
            tracing::warn!(%requested, %rate, "tax rate out of range, clamped");
        }
        rate
    }
}

impl<Inner: PricingStage> PricingStage for TaxStage<Inner> {
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
            let rate = self.effective_rate(order);
            upstream
                .checked_mul(Decimal::ONE + rate)
                .ok_or_else(|| total_overflow(Self::NAME))
        })
    }
}

impl<Inner: fmt::Debug> fmt::Debug for TaxStage<Inner> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TaxStage")
            .field("inner", &self.inner)
            .field("has_rate_provider", &self.rate_provider.is_some())
            .finish()
    }
}
