//! Order snapshot types
//!
//! # Type list
//!
//! - [`LineItem`] - SKU, quantity and unit price
//! - [`ShippingMethod`] - `Standard` or `Express`
//! - [`OrderSnapshot`] - the frozen order handed to a pipeline

mod line_item;
mod shipping_method;
mod snapshot;

pub use line_item::{LineItem, SKU_MAX_LENGTH};
pub use shipping_method::{EXPRESS_SHIPPING_FEE, STANDARD_SHIPPING_FEE, ShippingMethod};
pub use snapshot::OrderSnapshot;
