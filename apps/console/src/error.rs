//! # Console Error Type
//!
//! Unified error type for everything the console prints.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Dreams POS                             │
//! │                                                                         │
//! │  Menu action (e.g. add product to sale)                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  StoreError::NotFound ─────────┐                                        │
//! │  StoreError::Core(InvalidStock)├──► ConsoleError { code, message }      │
//! │  ValidationError ──────────────┘            │                           │
//! │                                             ▼                           │
//! │                           "Error: Product not found: 42"                │
//! │                           (menu keeps running)                          │
//! │                                                                         │
//! │  Config / Io errors abort startup and set the exit code.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use dreams_core::{CoreError, ValidationError};
use dreams_store::StoreError;
use thiserror::Error;

/// Error shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConsoleError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A rule of the sale lifecycle or catalog was broken
    BusinessLogic,

    /// Stock would go negative
    InvalidStock,

    /// Bad arguments or configuration
    Config,

    /// Terminal or file I/O failed
    Io,
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl ConsoleError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::Config, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }
}

impl From<CoreError> for ConsoleError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ConsoleError::from(e),
            CoreError::ProductNotFound(id) => {
                ConsoleError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            e @ CoreError::InvalidStock { .. } => {
                ConsoleError::new(ErrorCode::InvalidStock, e.to_string())
            }
            e @ CoreError::IllegalState { .. } => {
                ConsoleError::new(ErrorCode::BusinessLogic, e.to_string())
            }
        }
    }
}

impl From<StoreError> for ConsoleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => ConsoleError::from(e),
            StoreError::Validation(e) => ConsoleError::from(e),
            e @ StoreError::NotFound { .. } => ConsoleError::new(ErrorCode::NotFound, e.to_string()),
            e @ StoreError::Duplicate { .. } => {
                ConsoleError::new(ErrorCode::ValidationError, e.to_string())
            }
            e @ (StoreError::Inactive { .. } | StoreError::InUse { .. }) => {
                ConsoleError::new(ErrorCode::BusinessLogic, e.to_string())
            }
        }
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::validation(err.to_string())
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        ConsoleError::new(ErrorCode::Io, err.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::new(ErrorCode::Io, format!("Cannot write JSON: {}", err))
    }
}

impl From<toml::de::Error> for ConsoleError {
    fn from(err: toml::de::Error) -> Self {
        ConsoleError::config(format!("Invalid config file: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreams_core::{ProductId, SaleId, SaleStatus};

    #[test]
    fn test_store_errors_map_to_codes() {
        let err = ConsoleError::from(StoreError::not_found("Customer", 7));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Customer not found: 7");

        let err = ConsoleError::from(StoreError::duplicate("email", "ana@example.com"));
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = ConsoleError::from(StoreError::inactive("Product", 3));
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_core_errors_are_unwrapped() {
        let stock = StoreError::Core(CoreError::InvalidStock {
            product_id: ProductId::new(1),
            stock: 2,
            delta: -5,
        });
        assert_eq!(ConsoleError::from(stock).code, ErrorCode::InvalidStock);

        let state = CoreError::illegal_state(SaleId::new(4), SaleStatus::Completed, "add lines");
        let err = ConsoleError::from(StoreError::from(state));
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(err.message.contains("Sale 4 is completed"));

        let validation = StoreError::Core(CoreError::Validation(ValidationError::required("name")));
        assert_eq!(ConsoleError::from(validation).message, "name is required");
    }
}
