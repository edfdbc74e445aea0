//! # Repository Module
//!
//! Directory traits and their in-memory implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Directories and Services                             │
//! │                                                                         │
//! │  SaleService::add_product(sale, product, qty)                           │
//! │       │                                                                 │
//! │       │  sales.find_by_id_mut(sale)                                     │
//! │       │  products.product_mut(product)                                  │
//! │       ▼                                                                 │
//! │  SaleDirectory / ProductCatalog (traits)                                │
//! │  ├── save / find_by_id / remove                                         │
//! │  └── queries (active, by state, by customer, by date)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemory* (BTreeMap keyed by id, so listing order = creation order)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Directories
//!
//! - [`ProductCatalog`] - Products, stock and name search
//! - [`CustomerDirectory`] - Customers, email lookup
//! - [`SaleDirectory`] - Sales by id, state, customer and date

pub mod customer;
pub mod product;
pub mod sale;

pub use customer::{CustomerDirectory, InMemoryCustomerDirectory};
pub use product::{InMemoryProductCatalog, ProductCatalog};
pub use sale::{InMemorySaleDirectory, SaleDirectory};
