//! # Sale Line Item
//!
//! One product-and-quantity entry of a sale.
//!
//! ## Price Freezing
//! The unit price is captured when the line is created. Later price changes
//! on the product never reach an existing line.
//!
//! The subtotal is derived: every mutation recomputes it, and there is no
//! setter for it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ValidationError;
use crate::id::{LineItemId, ProductId, SaleId};
use crate::money::Money;
use crate::validation::{validate_price, validate_quantity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleLineItem {
    id: LineItemId,
    product_id: ProductId,
    quantity: i64,
    unit_price: Money,
    subtotal: Money,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SaleLineItem {
    /// Creates a line with a frozen unit price.
    ///
    /// ## Errors
    /// `ValidationError` if the quantity or the unit price is not positive.
    pub fn new(
        id: LineItemId,
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, ValidationError> {
        product_id.validate()?;
        validate_quantity(quantity)?;
        validate_price(unit_price)?;
        let subtotal = Self::compute_subtotal(unit_price, quantity)?;

        let now = Utc::now();
        Ok(SaleLineItem {
            id,
            product_id,
            quantity,
            unit_price,
            subtotal,
            created_at: now,
            updated_at: now,
        })
    }

    /// `unit_price × quantity`. Money is held in cents, so the product is
    /// already exact to two decimals.
    pub fn compute_subtotal(unit_price: Money, quantity: i64) -> Result<Money, ValidationError> {
        unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| ValidationError::invalid_format("quantity", "line total is too large"))
    }

    pub fn id(&self) -> LineItemId {
        self.id
    }

    pub fn sale_id(&self) -> SaleId {
        self.id.sale_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The subtotal this line would have at `quantity`, without applying it,
    /// so callers can validate before touching stock.
    pub fn subtotal_for(&self, quantity: i64) -> Result<Money, ValidationError> {
        validate_quantity(quantity)?;
        Self::compute_subtotal(self.unit_price, quantity)
    }

    /// Sets a new quantity and recomputes the subtotal.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ValidationError> {
        validate_quantity(quantity)?;
        self.subtotal = Self::compute_subtotal(self.unit_price, quantity)?;
        self.quantity = quantity;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_id(seq: u32) -> LineItemId {
        LineItemId::new(SaleId::new(1), seq)
    }

    #[test]
    fn test_new_line_computes_subtotal() {
        let line = SaleLineItem::new(line_id(1), ProductId::new(7), 3, Money::from_cents(1999)).unwrap();
        assert_eq!(line.subtotal().cents(), 5997);
        assert_eq!(line.sale_id(), SaleId::new(1));
        assert_eq!(line.id().to_string(), "1-1");
    }

    #[test]
    fn test_new_line_rejects_bad_input() {
        assert!(SaleLineItem::new(line_id(1), ProductId::new(7), 0, Money::from_cents(100)).is_err());
        assert!(SaleLineItem::new(line_id(1), ProductId::new(7), 1, Money::zero()).is_err());
        assert!(SaleLineItem::new(line_id(1), ProductId::new(0), 1, Money::from_cents(100)).is_err());
    }

    #[test]
    fn test_set_quantity_recomputes_subtotal() {
        let mut line = SaleLineItem::new(line_id(1), ProductId::new(7), 1, Money::from_cents(250)).unwrap();
        line.set_quantity(4).unwrap();
        assert_eq!(line.subtotal().cents(), 1000);

        assert!(line.set_quantity(0).is_err());
        assert_eq!(line.quantity(), 4);
        assert_eq!(line.subtotal().cents(), 1000);
    }

    #[test]
    fn test_subtotal_overflow_is_rejected() {
        let price = Money::from_cents(i64::MAX / 2 + 1);
        assert!(SaleLineItem::compute_subtotal(price, 2).is_err());

        let line = SaleLineItem::new(line_id(1), ProductId::new(7), 1, price).unwrap();
        assert!(line.subtotal_for(2).is_err());
        assert_eq!(line.subtotal_for(1), Ok(price));
    }
}
