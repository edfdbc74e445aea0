//! # Service Module
//!
//! Use cases over the directories. A service borrows the directories it
//! needs for the duration of one call chain; [`crate::Store`] hands them out.
//!
//! - [`CustomerService`] - Registration, updates, activation
//! - [`ProductService`] - Catalog maintenance and stock adjustments
//! - [`SaleService`] - Sale lifecycle and receipts

pub mod customer;
pub mod product;
pub mod sale;

pub use customer::CustomerService;
pub use product::ProductService;
pub use sale::SaleService;
