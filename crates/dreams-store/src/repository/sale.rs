//! # Sale Directory
//!
//! Storage for sales. Sales are mutated in place through
//! [`SaleDirectory::find_by_id_mut`]; the aggregate itself enforces its
//! lifecycle.
//!
//! ## Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Queries                                      │
//! │                                                                         │
//! │  find_by_state(Completed)      → sales closed at the register           │
//! │  find_by_customer(id)          → purchase history                       │
//! │  find_by_date_range(from, to)  → created_at in [from, to]               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use dreams_core::{CustomerId, Sale, SaleId, SaleStatus};

pub trait SaleDirectory {
    /// Inserts the sale, replacing any record with the same id.
    fn save(&mut self, sale: Sale);

    fn find_by_id(&self, id: SaleId) -> Option<&Sale>;

    fn find_by_id_mut(&mut self, id: SaleId) -> Option<&mut Sale>;

    /// Every sale in id order.
    fn all(&self) -> Vec<&Sale>;

    fn count(&self) -> usize;

    fn find_by_state(&self, status: SaleStatus) -> Vec<&Sale> {
        self.all()
            .into_iter()
            .filter(|s| s.status() == status)
            .collect()
    }

    fn find_by_customer(&self, customer_id: CustomerId) -> Vec<&Sale> {
        self.all()
            .into_iter()
            .filter(|s| s.customer_id() == customer_id)
            .collect()
    }

    /// Sales created within `[from, to]`, both ends inclusive.
    fn find_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<&Sale> {
        self.all()
            .into_iter()
            .filter(|s| s.created_at() >= from && s.created_at() <= to)
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySaleDirectory {
    sales: BTreeMap<SaleId, Sale>,
}

impl InMemorySaleDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaleDirectory for InMemorySaleDirectory {
    fn save(&mut self, sale: Sale) {
        self.sales.insert(sale.id(), sale);
    }

    fn find_by_id(&self, id: SaleId) -> Option<&Sale> {
        self.sales.get(&id)
    }

    fn find_by_id_mut(&mut self, id: SaleId) -> Option<&mut Sale> {
        self.sales.get_mut(&id)
    }

    fn all(&self) -> Vec<&Sale> {
        self.sales.values().collect()
    }

    fn count(&self) -> usize {
        self.sales.len()
    }
}
