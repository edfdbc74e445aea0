//! # Identifiers
//!
//! Strongly-typed identifiers for catalog, customer and sale records.
//!
//! ## Where Ids Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Identifier Sources                               │
//! │                                                                         │
//! │  IdGenerator (owned by the store) ──┬──► ProductId   1, 2, 3 ...         │
//! │                                     ├──► CustomerId  1, 2, 3 ...         │
//! │                                     └──► SaleId      1, 2, 3 ...         │
//! │                                                                         │
//! │  Sale (owns its lines) ─────────────────► LineItemId  "<sale>-<seq>"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zero is never issued, so an id of 0 stands in for "absent" at the input
//! boundary and is rejected by [`ProductId::validate`] and friends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

macro_rules! impl_numeric_id {
    ($t:ident, $field:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(u64);

        impl $t {
            #[inline]
            pub const fn new(value: u64) -> Self {
                $t(value)
            }

            #[inline]
            pub const fn value(&self) -> u64 {
                self.0
            }

            /// Rejects the zero id, which is never issued by a generator.
            pub fn validate(&self) -> Result<(), ValidationError> {
                if self.0 == 0 {
                    return Err(ValidationError::required($field));
                }
                Ok(())
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $t {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))?;
                let id = $t(value);
                id.validate()?;
                Ok(id)
            }
        }
    };
}

impl_numeric_id!(ProductId, "product id");
impl_numeric_id!(CustomerId, "customer id");
impl_numeric_id!(SaleId, "sale id");

// =============================================================================
// Line Item Id
// =============================================================================

/// Identifier of a line item, scoped to the sale that owns it.
///
/// The sequence number comes from a per-sale counter that only moves
/// forward, so a removed line's id is never handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineItemId {
    pub sale_id: SaleId,
    pub seq: u32,
}

impl LineItemId {
    pub const fn new(sale_id: SaleId, seq: u32) -> Self {
        LineItemId { sale_id, seq }
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.sale_id, self.seq)
    }
}

impl FromStr for LineItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sale, seq) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ValidationError::invalid_format("line id", "expected <sale>-<line>"))?;
        let sale_id = sale.parse::<SaleId>()?;
        let seq = seq
            .parse::<u32>()
            .map_err(|e| ValidationError::invalid_format("line id", e.to_string()))?;
        if seq == 0 {
            return Err(ValidationError::required("line id"));
        }
        Ok(LineItemId { sale_id, seq })
    }
}

// =============================================================================
// Id Generation
// =============================================================================

/// Source of fresh identifiers.
///
/// Injected into whatever owns the records (the store), instead of living
/// in a process-wide static.
pub trait IdGenerator {
    fn next_product_id(&mut self) -> ProductId;
    fn next_customer_id(&mut self) -> CustomerId;
    fn next_sale_id(&mut self) -> SaleId;
}

/// Independent monotonic counters per record kind, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    products: u64,
    customers: u64,
    sales: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_product_id(&mut self) -> ProductId {
        self.products += 1;
        ProductId(self.products)
    }

    fn next_customer_id(&mut self) -> CustomerId {
        self.customers += 1;
        CustomerId(self.customers)
    }

    fn next_sale_id(&mut self) -> SaleId {
        self.sales += 1;
        SaleId(self.sales)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_independent_per_kind() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_product_id(), ProductId::new(1));
        assert_eq!(ids.next_product_id(), ProductId::new(2));
        assert_eq!(ids.next_customer_id(), CustomerId::new(1));
        assert_eq!(ids.next_sale_id(), SaleId::new(1));
    }

    #[test]
    fn test_zero_id_is_rejected() {
        assert!(CustomerId::new(0).validate().is_err());
        assert!(CustomerId::new(4).validate().is_ok());
        assert!("0".parse::<SaleId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
        assert_eq!(" 12 ".parse::<ProductId>(), Ok(ProductId::new(12)));
    }

    #[test]
    fn test_line_item_id_display_and_parse() {
        let id = LineItemId::new(SaleId::new(12), 3);
        assert_eq!(id.to_string(), "12-3");
        assert_eq!("12-3".parse::<LineItemId>(), Ok(id));
        assert!("12".parse::<LineItemId>().is_err());
        assert!("12-0".parse::<LineItemId>().is_err());
        assert!("x-1".parse::<LineItemId>().is_err());
    }
}
