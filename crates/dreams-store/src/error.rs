//! # Store Error Types
//!
//! Error types for directory lookups and service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (dreams-core)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds lookup and uniqueness failures         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConsoleError (console app) ← Code + message for the operator           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use dreams_core::{CoreError, ValidationError};
use thiserror::Error;

/// Service operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Record not found in its directory.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Uniqueness rule violated.
    ///
    /// ## When This Occurs
    /// - Registering a customer with an email already on file
    /// - Registering a product whose name is already taken
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The record exists but is deactivated.
    ///
    /// ## When This Occurs
    /// - Opening a sale for an inactive customer
    /// - Adding an inactive product to a sale
    #[error("{entity} {id} is inactive")]
    Inactive { entity: String, id: String },

    /// The record is still referenced and cannot be removed.
    #[error("{entity} {id} is referenced by {references} sale(s)")]
    InUse {
        entity: String,
        id: String,
        references: usize,
    },

    /// Sale engine rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn inactive(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::Inactive {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
