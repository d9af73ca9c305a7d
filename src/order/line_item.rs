//! Order line item

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::simple_types::ValidationError;
use crate::simple_types::constrained_type::{
    check_non_negative_decimal, check_positive_integer, check_string,
};

/// Maximum number of characters in a SKU
pub const SKU_MAX_LENGTH: usize = 50;

/// One line of an order: a SKU bought `quantity` times at `unit_price`
///
/// [`LineItem::new`] stores its inputs as given, the same way deserialization
/// does. Use [`LineItem::create`] to reject bad values up front; the base
/// calculator checks every item again before summing.
///
/// # Examples
///
/// ```
/// use pricing_pipeline::order::LineItem;
/// use rust_decimal::Decimal;
///
/// let item = LineItem::create("W1234", 3, Decimal::new(1250, 2)).unwrap();
/// assert_eq!(item.subtotal(), Some(Decimal::new(3750, 2)));
///
/// assert!(LineItem::create("W1234", 0, Decimal::ONE).is_err());
/// assert!(LineItem::create("W1234", 1, Decimal::NEGATIVE_ONE).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItem {
    sku: String,
    quantity: i64,
    unit_price: Decimal,
}

impl LineItem {
    /// Builds a line item without checking it
    #[must_use]
    pub fn new(sku: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            unit_price,
        }
    }

    /// Builds a line item, rejecting invalid values
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the SKU is empty or longer than
    /// [`SKU_MAX_LENGTH`], the quantity is not positive, or the unit price
    /// is negative.
    pub fn create(
        sku: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Result<Self, ValidationError> {
        let item = Self::new(sku, quantity, unit_price);
        item.validate()?;
        Ok(item)
    }

    /// Checks the item's invariants
    ///
    /// Field names in the error are relative to the item (`quantity`,
    /// `unit_price`, `sku`); callers add their own prefix with
    /// [`ValidationError::within`].
    ///
    /// # Errors
    ///
    /// See [`LineItem::create`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_string("sku", SKU_MAX_LENGTH, &self.sku)?;
        check_positive_integer("quantity", self.quantity)?;
        check_non_negative_decimal("unit_price", self.unit_price)?;
        Ok(())
    }

    /// `quantity * unit_price`, or `None` if the product overflows
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }

    #[must_use]
    pub fn sku(&self) -> &str {
        &self.sku
    }

    #[must_use]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}
