//! # Customer Directory
//!
//! Storage for customers, with lookup by id or email.

use std::collections::BTreeMap;

use dreams_core::{Customer, CustomerId};

pub trait CustomerDirectory {
    /// Inserts the customer, replacing any record with the same id.
    fn save(&mut self, customer: Customer);

    fn find_by_id(&self, id: CustomerId) -> Option<&Customer>;

    fn find_by_id_mut(&mut self, id: CustomerId) -> Option<&mut Customer>;

    fn remove(&mut self, id: CustomerId) -> Option<Customer>;

    /// Every customer in id order.
    fn all(&self) -> Vec<&Customer>;

    fn count(&self) -> usize;

    /// Emails compare case-insensitively.
    fn find_by_email(&self, email: &str) -> Option<&Customer> {
        let email = email.trim();
        self.all()
            .into_iter()
            .find(|c| c.email().eq_ignore_ascii_case(email))
    }

    fn active(&self) -> Vec<&Customer> {
        self.all().into_iter().filter(|c| c.is_active()).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerDirectory {
    customers: BTreeMap<CustomerId, Customer>,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn save(&mut self, customer: Customer) {
        self.customers.insert(customer.id(), customer);
    }

    fn find_by_id(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    fn find_by_id_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.get_mut(&id)
    }

    fn remove(&mut self, id: CustomerId) -> Option<Customer> {
        self.customers.remove(&id)
    }

    fn all(&self) -> Vec<&Customer> {
        self.customers.values().collect()
    }

    fn count(&self) -> usize {
        self.customers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> InMemoryCustomerDirectory {
        let mut directory = InMemoryCustomerDirectory::new();
        directory.save(Customer::new(CustomerId::new(1), "Ana", "ana@example.com").unwrap());
        directory.save(Customer::new(CustomerId::new(2), "Luis", "Luis@Example.com").unwrap());
        directory
    }

    #[test]
    fn test_find_by_email_ignores_case() {
        let directory = directory();
        let found = directory.find_by_email(" luis@example.COM ").map(|c| c.id());
        assert_eq!(found, Some(CustomerId::new(2)));
        assert!(directory.find_by_email("nadie@example.com").is_none());
    }

    #[test]
    fn test_active_filters_deactivated() {
        let mut directory = directory();
        directory.find_by_id_mut(CustomerId::new(1)).unwrap().set_active(false);

        let active: Vec<&str> = directory.active().iter().map(|c| c.name()).collect();
        assert_eq!(active, vec!["Luis"]);
        assert_eq!(directory.count(), 2);
    }

    #[test]
    fn test_remove() {
        let mut directory = directory();
        assert!(directory.remove(CustomerId::new(1)).is_some());
        assert!(directory.remove(CustomerId::new(1)).is_none());
        assert_eq!(directory.all().len(), 1);
    }
}
