//! # pricing-pipeline
//!
//! Composable order pricing. An immutable [`OrderSnapshot`](order::OrderSnapshot)
//! is priced by a chain of stages, each wrapping the previous one:
//!
//! ```text
//! Base -> Shipping -> Tax -> Coupon -> ...
//! ```
//!
//! ## Module Structure
//!
//! - `simple_types`: value checks and the validation / construction errors
//! - `order`: `LineItem`, `ShippingMethod`, `OrderSnapshot`
//! - `pipeline`: stages, composition, runtime building and JSON configuration
//!
//! ## Example
//!
//! ```rust
//! use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
//! use pricing_pipeline::pipeline::{StageSpec, build_pipeline};
//! use rust_decimal::Decimal;
//!
//! let pipeline = build_pipeline([
//!     StageSpec::Shipping,
//!     StageSpec::FlatTax { rate: Decimal::new(8, 2) },
//!     StageSpec::Coupon { percent: Decimal::new(10, 2) },
//! ])
//! .unwrap();
//!
//! let order = OrderSnapshot::new(
//!     vec![LineItem::create("W1234", 3, Decimal::from(100)).unwrap()],
//!     ShippingMethod::Express,
//! );
//!
//! // ((300 + 15) * 1.08) * 0.90
//! assert_eq!(pipeline.calculate(&order).unwrap(), Decimal::new(30618, 2));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod order;
pub mod pipeline;
pub mod simple_types;
