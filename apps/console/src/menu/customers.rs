use std::io::{BufRead, Write};

use dreams_core::{Customer, CustomerId};

use super::Console;
use crate::prompt::MenuResult;

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub(super) fn customers_menu(&mut self) -> MenuResult {
        loop {
            let choice = self.choose(
                "Customers",
                &[
                    "Add customer",
                    "List customers",
                    "Find customer",
                    "Update customer",
                    "Deactivate customer",
                    "Reactivate customer",
                ],
                "Back",
            )?;
            match choice {
                1 => self.add_customer()?,
                2 => self.list_customers()?,
                3 => self.find_customer()?,
                4 => self.update_customer()?,
                5 => self.set_customer_active(false)?,
                6 => self.set_customer_active(true)?,
                0 => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn add_customer(&mut self) -> MenuResult {
        let name = self.prompt.line("Name: ")?;
        let email = self.prompt.line("Email: ")?;
        match self.store.customers().register(&name, &email) {
            Ok(customer) => self
                .prompt
                .say(format!("Customer registered with id {}.", customer.id())),
            Err(e) => self.report(e),
        }
    }

    fn list_customers(&mut self) -> MenuResult {
        let rows = self
            .store
            .customer_directory()
            .all()
            .into_iter()
            .map(customer_row)
            .collect();
        self.print_rows("No customers registered.", rows)
    }

    fn find_customer(&mut self) -> MenuResult {
        let id = CustomerId::new(self.prompt.number("Customer id: ")?);
        let found = self.store.customers().find(id).map(customer_row);
        match found {
            Ok(row) => {
                let purchases = self.store.sale_directory().find_by_customer(id).len();
                self.prompt.say(row)?;
                self.prompt.say(format!("      Sales: {}", purchases))
            }
            Err(e) => self.report(e),
        }
    }

    fn update_customer(&mut self) -> MenuResult {
        let id = CustomerId::new(self.prompt.number("Customer id: ")?);
        let found = self.store.customers().find(id).map(customer_row);
        match found {
            Ok(row) => self.prompt.say(row)?,
            Err(e) => return self.report(e),
        }

        let name = self.prompt.line("New name: ")?;
        let email = self.prompt.line("New email: ")?;
        match self.store.customers().update(id, &name, &email) {
            Ok(()) => self.prompt.say("Customer updated."),
            Err(e) => self.report(e),
        }
    }

    fn set_customer_active(&mut self, active: bool) -> MenuResult {
        let id = CustomerId::new(self.prompt.number("Customer id: ")?);
        let mut customers = self.store.customers();
        let result = if active {
            customers.reactivate(id)
        } else {
            customers.deactivate(id)
        };
        match result {
            Ok(()) if active => self.prompt.say("Customer reactivated."),
            Ok(()) => self.prompt.say("Customer deactivated."),
            Err(e) => self.report(e),
        }
    }
}

fn customer_row(customer: &Customer) -> String {
    format!(
        "{:>4}  {:<25} {:<30} {}",
        customer.id(),
        customer.name(),
        customer.email(),
        if customer.is_active() { "active" } else { "inactive" }
    )
}
