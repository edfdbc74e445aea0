//! # Error Types
//!
//! Domain-specific error types for dreams-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dreams-core errors (this file)                                         │
//! │  ├── CoreError        - Sale/stock rule violations                      │
//! │  └── ValidationError  - Malformed input                                 │
//! │                                                                         │
//! │  dreams-store errors (separate crate)                                   │
//! │  └── StoreError       - Lookup failures, duplicates, inactive records   │
//! │                                                                         │
//! │  Console errors (in app)                                                │
//! │  └── ConsoleError     - What the operator sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ConsoleError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Failures Are Not Errors
//! Insufficient stock on `add_line` and a missing line on `remove_line` are
//! expected business outcomes. They come back as `Ok(false)`, never as one of
//! the variants below.

use thiserror::Error;

use crate::id::{ProductId, SaleId};
use crate::types::SaleStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the sale engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Sale is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Adding or removing lines on a completed/cancelled sale
    /// - Finalizing a sale with no lines
    /// - Editing the comment of a terminal sale
    #[error("Sale {sale_id} is {status}, cannot {operation}")]
    IllegalState {
        sale_id: SaleId,
        status: SaleStatus,
        operation: String,
    },

    /// A stock adjustment would leave the product with negative stock.
    ///
    /// ## When This Occurs
    /// Callers are expected to run `check_availability` first, so seeing
    /// this error means the pre-check was skipped.
    #[error("Invalid stock adjustment for product {product_id}: stock {stock}, delta {delta}")]
    InvalidStock {
        product_id: ProductId,
        stock: i64,
        delta: i64,
    },

    /// A line references a product the caller could not resolve.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

impl CoreError {
    /// Creates an IllegalState error for the given sale.
    pub fn illegal_state(sale_id: SaleId, status: SaleStatus, operation: impl Into<String>) -> Self {
        CoreError::IllegalState {
            sale_id,
            status,
            operation: operation.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., unparseable amount, malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    pub fn negative(field: impl Into<String>) -> Self {
        ValidationError::Negative {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidStock {
            product_id: ProductId::new(7),
            stock: 2,
            delta: -5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid stock adjustment for product 7: stock 2, delta -5"
        );

        let err = CoreError::illegal_state(SaleId::new(3), SaleStatus::Completed, "add line");
        assert_eq!(err.to_string(), "Sale 3 is completed, cannot add line");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("name").to_string(),
            "name is required"
        );
        assert_eq!(
            ValidationError::must_be_positive("quantity").to_string(),
            "quantity must be positive"
        );
        assert_eq!(
            ValidationError::negative("stock").to_string(),
            "stock cannot be negative"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("customer").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
