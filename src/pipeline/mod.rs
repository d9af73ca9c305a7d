//! The pricing pipeline
//!
//! A chain of [`PricingStage`]s applied to an [`OrderSnapshot`] to yield one
//! total. [`BaseCalculator`] is always innermost; every other stage wraps
//! exactly one inner stage and transforms its total on the way out.
//!
//! # Stage list
//!
//! | Stage | Effect on the running total |
//! |-------|-----------------------------|
//! | [`BaseCalculator`] | sum of `quantity * unit_price` (ignores any upstream) |
//! | [`ShippingFeeStage`] | `+ 5` (Standard) or `+ 15` (Express) |
//! | [`TaxStage`] | `* (1 + clamp(rate, 0, 1))` |
//! | [`CouponPercentStage`] | `max(0, total - total * percent)` |
//! | [`FlatDiscountStage`] | `max(0, total - amount)` |
//! | [`RoundingStage`] | rounded to `scale` places, half away from zero |
//!
//! # Composing
//!
//! Chains are composed statically with [`StageExt`], or at runtime from a
//! list of [`StageSpec`]s with [`build_pipeline`] (optionally loaded from a
//! [`PipelineConfig`]). Wrapping order matters: the outermost stage is
//! applied last, so a coupon applied after shipping discounts the shipping
//! fee too.
//!
//! [`OrderSnapshot`]: crate::order::OrderSnapshot

mod base;
mod builder;
mod config;
mod coupon;
mod discount;
mod error;
mod ext;
mod rounding;
mod shipping;
mod stage;
mod tax;

pub use base::BaseCalculator;
pub use builder::{Breakdown, Pipeline, StageSpec, build_pipeline, calculate};
pub use config::{PipelineConfig, StageConfig};
pub use coupon::CouponPercentStage;
pub use discount::FlatDiscountStage;
pub use error::{PricingError, PricingResult};
pub use ext::StageExt;
pub use rounding::{CENTS_SCALE, MAX_SCALE, RoundingStage};
pub use shipping::ShippingFeeStage;
pub use stage::{BoxedStage, PricingStage, StageTotal};
pub use tax::{RateProvider, TaxStage, flat_rate};

static_assertions::assert_impl_all!(Pipeline: Send, Sync);
static_assertions::assert_impl_all!(BoxedStage: Send, Sync);
static_assertions::assert_impl_all!(StageSpec: Send, Sync, Clone);
static_assertions::assert_obj_safe!(PricingStage);
