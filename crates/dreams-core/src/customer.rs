//! # Customer
//!
//! A buyer a sale is bound to. Sales keep only the [`CustomerId`]; the
//! record itself lives in the customer directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::CustomerId;
use crate::validation::{validate_customer_name, validate_email};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an active customer. Name and email are stored trimmed.
    pub fn new(id: CustomerId, name: &str, email: &str) -> Result<Self, ValidationError> {
        id.validate()?;
        validate_customer_name(name)?;
        validate_email(email)?;

        let now = Utc::now();
        Ok(Customer {
            id,
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces name and email. Both are validated before either changes.
    pub fn update(&mut self, name: &str, email: &str) -> Result<(), ValidationError> {
        validate_customer_name(name)?;
        validate_email(email)?;

        self.name = name.trim().to_string();
        self.email = email.trim().to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }
}
