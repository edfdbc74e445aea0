//! # Store
//!
//! Single owner of the directories and the id generator. Services are
//! handed out per call, borrowing exactly the directories they need.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             Store                                       │
//! │                                                                         │
//! │   ┌──────────────────┐ ┌───────────────────┐ ┌──────────────────┐      │
//! │   │ ProductCatalog   │ │ CustomerDirectory │ │ SaleDirectory    │      │
//! │   └────────▲─────────┘ └─────────▲─────────┘ └────────▲─────────┘      │
//! │            │                     │                    │                 │
//! │   store.products()      store.customers()      store.sales()           │
//! │   ProductService        CustomerService        SaleService             │
//! │                                                                         │
//! │   SequentialIds ── product / customer / sale counters                  │
//! │                                                                         │
//! │   SharedStore = Arc<Mutex<Store>> for callers on several threads        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use dreams_core::{SequentialIds, TaxRate, DEFAULT_TAX_RATE};

use crate::repository::{
    CustomerDirectory, InMemoryCustomerDirectory, InMemoryProductCatalog, InMemorySaleDirectory,
    ProductCatalog, SaleDirectory,
};
use crate::service::{CustomerService, ProductService, SaleService};

#[derive(Debug, Clone)]
pub struct Store {
    products: InMemoryProductCatalog,
    customers: InMemoryCustomerDirectory,
    sales: InMemorySaleDirectory,
    ids: SequentialIds,
    default_tax_rate: TaxRate,
}

impl Store {
    /// Creates an empty store charging the default 16% IVA on new sales.
    pub fn new() -> Self {
        Self::with_tax_rate(DEFAULT_TAX_RATE)
    }

    pub fn with_tax_rate(default_tax_rate: TaxRate) -> Self {
        Store {
            products: InMemoryProductCatalog::new(),
            customers: InMemoryCustomerDirectory::new(),
            sales: InMemorySaleDirectory::new(),
            ids: SequentialIds::new(),
            default_tax_rate,
        }
    }

    pub fn default_tax_rate(&self) -> TaxRate {
        self.default_tax_rate
    }

    /// Returns the customer service.
    ///
    /// ## Example
    /// ```rust
    /// use dreams_store::Store;
    ///
    /// let mut store = Store::new();
    /// let ana = store.customers().register("Ana", "ana@example.com").unwrap();
    /// assert_eq!(store.customer_directory().count(), 1);
    /// # let _ = ana;
    /// ```
    pub fn customers(&mut self) -> CustomerService<'_> {
        CustomerService::new(&mut self.customers, &self.sales, &mut self.ids)
    }

    pub fn products(&mut self) -> ProductService<'_> {
        ProductService::new(&mut self.products, &mut self.ids)
    }

    pub fn sales(&mut self) -> SaleService<'_> {
        SaleService::new(
            &mut self.sales,
            &mut self.products,
            &self.customers,
            &mut self.ids,
            self.default_tax_rate,
        )
    }

    pub fn product_catalog(&self) -> &dyn ProductCatalog {
        &self.products
    }

    pub fn customer_directory(&self) -> &dyn CustomerDirectory {
        &self.customers
    }

    pub fn sale_directory(&self) -> &dyn SaleDirectory {
        &self.sales
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Store`] shared behind `Arc<Mutex<_>>`.
///
/// Each closure runs with the lock held, so a multi-step change made inside
/// one `with_store_mut` call is never observed half done. A poisoned lock is
/// recovered: store operations check stock and amount limits before they
/// mutate anything, so only a caller's own closure can panic midway.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// use dreams_store::{SharedStore, Store};
    ///
    /// let shared = SharedStore::new(Store::new());
    /// shared.with_store_mut(|store| store.customers().register("Ana", "ana@example.com"))
    ///     .unwrap();
    /// assert_eq!(shared.with_store(|store| store.customer_directory().count()), 1);
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}
