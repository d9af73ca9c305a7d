//! Immutable order snapshot fed to the pricing pipeline

use serde::{Deserialize, Serialize};

use super::line_item::LineItem;
use super::shipping_method::ShippingMethod;

/// The items and shipping method of one order, frozen for pricing
///
/// Fields are private and there are no mutators; the pipeline only ever
/// borrows a snapshot.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::{LineItem, OrderSnapshot, ShippingMethod};
/// use rust_decimal::Decimal;
///
/// let order = OrderSnapshot::new(
///     vec![LineItem::create("W1234", 2, Decimal::from(10)).unwrap()],
///     ShippingMethod::Express,
/// );
/// assert_eq!(order.items().len(), 1);
/// assert!(order.shipping_method().is_express());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    items: Vec<LineItem>,
    #[serde(default)]
    shipping_method: ShippingMethod,
}

impl OrderSnapshot {
    #[must_use]
    pub const fn new(items: Vec<LineItem>, shipping_method: ShippingMethod) -> Self {
        Self {
            items,
            shipping_method,
        }
    }

    /// An order with no items
    #[must_use]
    pub const fn empty(shipping_method: ShippingMethod) -> Self {
        Self::new(Vec::new(), shipping_method)
    }

    /// Parses a snapshot from JSON
    ///
    /// Line items are not checked here.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] for malformed JSON or an unknown
    /// shipping method.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub const fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    fn test_empty() {
        let order = OrderSnapshot::empty(ShippingMethod::Standard);

        assert!(order.is_empty());
        assert_eq!(order.shipping_method(), ShippingMethod::Standard);
    }

    #[rstest]
    fn test_from_json() {
        let json = r#"{
            "items": [
                {"sku": "W1234", "quantity": 2, "unit_price": "100.00"},
                {"sku": "G123", "quantity": 1, "unit_price": "100"}
            ],
            "shipping_method": "express"
        }"#;

        let order = OrderSnapshot::from_json(json).unwrap();

        assert_eq!(order.items().len(), 2);
        assert_eq!(order.items()[0].unit_price(), Decimal::from(100));
        assert_eq!(order.shipping_method(), ShippingMethod::Express);
    }

    #[rstest]
    fn test_from_json_defaults_shipping_method() {
        let order = OrderSnapshot::from_json(r#"{"items": []}"#).unwrap();

        assert_eq!(order.shipping_method(), ShippingMethod::Standard);
    }

    #[rstest]
    fn test_from_json_rejects_unknown_shipping_method() {
        let result = OrderSnapshot::from_json(r#"{"items": [], "shipping_method": "drone"}"#);

        assert!(result.is_err());
    }

    #[rstest]
    fn test_from_json_keeps_invalid_items() {
        let json = r#"{"items": [{"sku": "W1", "quantity": 0, "unit_price": "1"}]}"#;

        let order = OrderSnapshot::from_json(json).unwrap();

        assert_eq!(order.items()[0].quantity(), 0);
    }
}
