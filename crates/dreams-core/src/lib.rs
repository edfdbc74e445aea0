//! # dreams-core: Sale Engine for Dreams POS
//!
//! Pure domain logic: money, products, customers and the sale aggregate
//! with its stock bookkeeping. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dreams POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  dreams-console (menus)                         │   │
//! │  │   Customers ──► Products ──► New sale ──► Sales / receipts      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               dreams-store (directories + services)             │   │
//! │  │   ProductCatalog, CustomerDirectory, SaleDirectory, Store       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ dreams-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   sale    │  │  product  │  │   money   │  │ validation│  │   │
//! │  │   │   Sale    │  │  Product  │  │   Money   │  │   rules   │  │   │
//! │  │   │ LineItem  │  │   Kind    │  │  TaxRate  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`sale`] - The sale aggregate and its state machine
//! - [`line_item`] - Sale lines with frozen unit prices
//! - [`product`] - Products, product kinds and the [`ProductLookup`] seam
//! - [`customer`] - Customer records
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Tax rate, sale status, categories
//! - [`id`] - Typed ids and the injected [`IdGenerator`]
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules
//!
//! ## Example Usage
//!
//! ```rust
//! use dreams_core::{Category, CustomerId, Money, Product, ProductId, ProductKind, Sale, SaleId};
//!
//! let mut shirt = Product::new(
//!     ProductId::new(1),
//!     "Camiseta",
//!     Money::from_cents(1000),
//!     5,
//!     Category::Clothing,
//!     ProductKind::General,
//! )
//! .unwrap();
//!
//! let mut sale = Sale::new(SaleId::new(1), CustomerId::new(1)).unwrap();
//! assert_eq!(sale.add_line(&mut shirt, 3), Ok(true));
//! assert_eq!(shirt.stock(), 2);
//!
//! // $30.00 + 16% IVA
//! assert_eq!(sale.total().cents(), 3480);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod customer;
pub mod error;
pub mod id;
pub mod line_item;
pub mod money;
pub mod product;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use id::{CustomerId, IdGenerator, LineItemId, ProductId, SaleId, SequentialIds};
pub use line_item::SaleLineItem;
pub use money::Money;
pub use product::{Product, ProductKind, ProductLookup};
pub use sale::Sale;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate a new sale starts with: 16% IVA.
pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(1600);
