//! # dreams-store: Directories and Services for Dreams POS
//!
//! In-memory directories for products, customers and sales, the services
//! that orchestrate them, and receipts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dreams POS Data Flow                             │
//! │                                                                         │
//! │  Console menu (New sale → add product)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   dreams-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │   Services    │    │ Directories  │  │   │
//! │  │   │  (store.rs)   │───►│  SaleService  │───►│ SaleDirectory│  │   │
//! │  │   │  SharedStore  │    │  ProductSvc   │    │ ProductCatlg │  │   │
//! │  │   │               │    │  CustomerSvc  │    │ CustomerDir  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dreams-core: Sale::add_line, Product::adjust_stock                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store owner and the shared wrapper
//! - [`service`] - Customer, product and sale use cases
//! - [`repository`] - Directory traits and in-memory implementations
//! - [`receipt`] - Receipt snapshot, text and JSON rendering
//! - [`seed`] - Demo catalog
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use dreams_core::{Category, Money, ProductKind};
//! use dreams_store::Store;
//!
//! let mut store = Store::new();
//! let ana = store.customers().register("Ana", "ana@example.com").unwrap();
//! let lamp = store
//!     .products()
//!     .register("Lámpara", Money::from_cents(45000), 3, Category::Home, ProductKind::General)
//!     .unwrap();
//!
//! let mut sales = store.sales();
//! let sale = sales.start_sale(ana.id()).unwrap();
//! assert!(sales.add_product(sale, lamp.id(), 2).unwrap());
//! assert!(sales.finalize(sale).unwrap());
//! assert_eq!(sales.receipt(sale).unwrap().total_cents, 104400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod receipt;
pub mod repository;
pub mod seed;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use receipt::{format_money, Receipt, ReceiptItem};
pub use store::{SharedStore, Store};

// Directory and service re-exports for convenience
pub use repository::{CustomerDirectory, ProductCatalog, SaleDirectory};
pub use service::{CustomerService, ProductService, SaleService};
