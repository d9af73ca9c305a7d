//! Shipping method tag carried by an order snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat fee charged for standard shipping
pub const STANDARD_SHIPPING_FEE: i64 = 5;

/// Flat fee charged for express shipping
pub const EXPRESS_SHIPPING_FEE: i64 = 15;

/// How an order is shipped
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::ShippingMethod;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ShippingMethod::Standard.flat_fee(), Decimal::from(5));
/// assert_eq!(ShippingMethod::Express.flat_fee(), Decimal::from(15));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Ground shipping
    #[default]
    Standard,

    /// Next-day shipping
    Express,
}

impl ShippingMethod {
    /// Flat shipping fee for this method
    #[must_use]
    pub fn flat_fee(self) -> Decimal {
        match self {
            Self::Standard => Decimal::from(STANDARD_SHIPPING_FEE),
            Self::Express => Decimal::from(EXPRESS_SHIPPING_FEE),
        }
    }

    /// Whether this is `Express`
    #[must_use]
    pub const fn is_express(self) -> bool {
        matches!(self, Self::Express)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ShippingMethod::Standard, 5)]
    #[case(ShippingMethod::Express, 15)]
    fn test_flat_fee(#[case] method: ShippingMethod, #[case] expected: i64) {
        assert_eq!(method.flat_fee(), Decimal::from(expected));
    }

    #[rstest]
    fn test_default_is_standard() {
        assert_eq!(ShippingMethod::default(), ShippingMethod::Standard);
        assert!(!ShippingMethod::default().is_express());
    }

    #[rstest]
    #[case(ShippingMethod::Standard, "\"standard\"")]
    #[case(ShippingMethod::Express, "\"express\"")]
    fn test_serde_uses_snake_case(#[case] method: ShippingMethod, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&method).unwrap(), json);
        assert_eq!(serde_json::from_str::<ShippingMethod>(json).unwrap(), method);
    }
}
