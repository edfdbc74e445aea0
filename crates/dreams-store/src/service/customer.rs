//! # Customer Service
//!
//! Registration and maintenance of customers. Email addresses are unique
//! across the directory, compared case-insensitively.

use tracing::{debug, info};

use dreams_core::validation::{validate_customer_name, validate_email};
use dreams_core::{Customer, CustomerId, IdGenerator};

use crate::error::{StoreError, StoreResult};
use crate::repository::{CustomerDirectory, SaleDirectory};

pub struct CustomerService<'a> {
    customers: &'a mut dyn CustomerDirectory,
    sales: &'a dyn SaleDirectory,
    ids: &'a mut dyn IdGenerator,
}

impl<'a> CustomerService<'a> {
    pub fn new(
        customers: &'a mut dyn CustomerDirectory,
        sales: &'a dyn SaleDirectory,
        ids: &'a mut dyn IdGenerator,
    ) -> Self {
        CustomerService {
            customers,
            sales,
            ids,
        }
    }

    /// Registers a new active customer.
    ///
    /// ## Errors
    /// - `Validation` for a blank name or malformed email
    /// - `Duplicate` if the email is already registered
    pub fn register(&mut self, name: &str, email: &str) -> StoreResult<Customer> {
        validate_customer_name(name)?;
        validate_email(email)?;
        self.ensure_email_free(email, None)?;

        let customer = Customer::new(self.ids.next_customer_id(), name, email)?;
        info!(customer_id = %customer.id(), email = %customer.email(), "Customer registered");

        self.customers.save(customer.clone());
        Ok(customer)
    }

    pub fn find(&self, id: CustomerId) -> StoreResult<&Customer> {
        self.customers
            .find_by_id(id)
            .ok_or_else(|| StoreError::not_found("Customer", id))
    }

    pub fn list(&self) -> Vec<&Customer> {
        self.customers.all()
    }

    pub fn list_active(&self) -> Vec<&Customer> {
        self.customers.active()
    }

    /// Replaces name and email.
    pub fn update(&mut self, id: CustomerId, name: &str, email: &str) -> StoreResult<()> {
        self.ensure_email_free(email, Some(id))?;
        self.customer_mut(id)?.update(name, email)?;

        info!(customer_id = %id, "Customer updated");
        Ok(())
    }

    pub fn deactivate(&mut self, id: CustomerId) -> StoreResult<()> {
        self.customer_mut(id)?.set_active(false);
        info!(customer_id = %id, "Customer deactivated");
        Ok(())
    }

    pub fn reactivate(&mut self, id: CustomerId) -> StoreResult<()> {
        self.customer_mut(id)?.set_active(true);
        info!(customer_id = %id, "Customer reactivated");
        Ok(())
    }

    /// Deletes a customer that has no sales. Customers with history can
    /// only be deactivated.
    pub fn remove(&mut self, id: CustomerId) -> StoreResult<Customer> {
        self.find(id)?;

        let references = self.sales.find_by_customer(id).len();
        if references > 0 {
            return Err(StoreError::InUse {
                entity: "Customer".to_string(),
                id: id.to_string(),
                references,
            });
        }

        let removed = self
            .customers
            .remove(id)
            .ok_or_else(|| StoreError::not_found("Customer", id))?;
        info!(customer_id = %id, "Customer removed");
        Ok(removed)
    }

    fn customer_mut(&mut self, id: CustomerId) -> StoreResult<&mut Customer> {
        self.customers
            .find_by_id_mut(id)
            .ok_or_else(|| StoreError::not_found("Customer", id))
    }

    fn ensure_email_free(&self, email: &str, owner: Option<CustomerId>) -> StoreResult<()> {
        match self.customers.find_by_email(email) {
            Some(existing) if Some(existing.id()) != owner => {
                debug!(email = %email.trim(), "Email already registered");
                Err(StoreError::duplicate("email", email.trim()))
            }
            _ => Ok(()),
        }
    }
}
