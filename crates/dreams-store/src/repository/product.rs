//! # Product Catalog
//!
//! Storage for products.
//!
//! ## Key Operations
//! - Lookup by id (also through [`ProductLookup`], which the sale engine uses)
//! - Active / in-stock listings
//! - Case-insensitive name search
//!
//! ## Name Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Name Search Works                                │
//! │                                                                         │
//! │  Operator types: "cami"                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lowercase substring match on product name                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │  1 | Camiseta Básica    | $199.90       │ ← MATCH!                   │
//! │  │  2 | Camisa de Vestir   | $459.00       │ ← MATCH!                   │
//! │  │  3 | Pantalón Mezclilla | $699.00       │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [1, 2] in id order                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use dreams_core::{Product, ProductId, ProductLookup};

/// Product storage used by the services.
///
/// Only `save`, `find_by_id`, `remove`, `all` and `count` need an
/// implementation; the listings are derived from `all`.
pub trait ProductCatalog: ProductLookup {
    /// Inserts the product, replacing any record with the same id.
    fn save(&mut self, product: Product);

    fn find_by_id(&self, id: ProductId) -> Option<&Product>;

    fn remove(&mut self, id: ProductId) -> Option<Product>;

    /// Every product in id order.
    fn all(&self) -> Vec<&Product>;

    fn count(&self) -> usize;

    fn active(&self) -> Vec<&Product> {
        self.all().into_iter().filter(|p| p.is_active()).collect()
    }

    /// Active products with at least one unit on hand.
    fn in_stock(&self) -> Vec<&Product> {
        self.all()
            .into_iter()
            .filter(|p| p.is_active() && p.stock() > 0)
            .collect()
    }

    /// Case-insensitive substring match on the name.
    fn search_by_name(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.all()
            .into_iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }
}

/// In-memory catalog keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCatalog {
    products: BTreeMap<ProductId, Product>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductLookup for InMemoryProductCatalog {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn save(&mut self, product: Product) {
        self.products.insert(product.id(), product);
    }

    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    fn remove(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }

    fn all(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    fn count(&self) -> usize {
        self.products.len()
    }
}
