use std::io::{BufRead, Write};

use dreams_core::{CustomerId, LineItemId, ProductId, Sale, SaleId, SaleStatus};
use dreams_store::Store;

use super::products::product_row;
use super::Console;
use crate::config::ConsoleConfig;
use crate::prompt::MenuResult;

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    /// Opens a sale for a chosen customer, collects products, then hands
    /// over to the edit loop.
    pub(super) fn new_sale(&mut self) -> MenuResult {
        let rows: Vec<String> = self
            .store
            .customer_directory()
            .active()
            .into_iter()
            .map(|c| format!("{:>4}  {} <{}>", c.id(), c.name(), c.email()))
            .collect();
        if rows.is_empty() {
            return self.prompt.say("Register an active customer first.");
        }
        self.prompt.say("Active customers:")?;
        self.print_rows("", rows)?;

        let customer: u64 = self.prompt.number("Customer id (0 to go back): ")?;
        if customer == 0 {
            return Ok(());
        }

        let sale_id = match self.store.sales().start_sale(CustomerId::new(customer)) {
            Ok(id) => id,
            Err(e) => return self.report(e),
        };
        self.prompt.say(format!("Sale {} opened.", sale_id))?;

        self.add_products(sale_id)?;
        self.edit_sale(sale_id)
    }

    fn add_products(&mut self, sale_id: SaleId) -> MenuResult {
        let config = self.config;
        let rows = self
            .store
            .product_catalog()
            .in_stock()
            .into_iter()
            .map(|p| product_row(config, p))
            .collect();
        self.prompt.say("Available products:")?;
        self.print_rows("No products in stock.", rows)?;

        loop {
            let product: u64 = self.prompt.number("Product id (0 to finish): ")?;
            if product == 0 {
                return Ok(());
            }
            let quantity: i64 = self.prompt.number("Quantity: ")?;

            let mut sales = self.store.sales();
            let result = sales
                .add_product(sale_id, ProductId::new(product), quantity)
                .and_then(|added| Ok((added, sales.find(sale_id)?.total())));
            match result {
                Ok((true, total)) => {
                    let total = self.money(total);
                    self.prompt.say(format!("Added. Sale total: {}", total))?
                }
                Ok((false, _)) => self.prompt.say("Not enough stock for that quantity.")?,
                Err(e) => self.report(e)?,
            }
        }
    }

    fn edit_sale(&mut self, sale_id: SaleId) -> MenuResult {
        loop {
            self.show_sale(sale_id)?;
            let choice = self.choose(
                &format!("Sale {}", sale_id),
                &[
                    "Finalize",
                    "Cancel sale",
                    "Remove a line",
                    "Change a line quantity",
                    "Set comment",
                    "Add more products",
                ],
                "Leave open",
            )?;
            match choice {
                1 => match self.store.sales().finalize(sale_id) {
                    Ok(_) => {
                        self.prompt.say("Sale finalized.")?;
                        return self.print_receipt(sale_id, false);
                    }
                    Err(e) => self.report(e)?,
                },
                2 => {
                    if self.cancel_sale(sale_id)? {
                        return Ok(());
                    }
                }
                3 => {
                    let line = self.pick_line(sale_id)?;
                    match self.store.sales().remove_line(sale_id, line) {
                        Ok(true) => self.prompt.say("Line removed.")?,
                        Ok(false) => self.prompt.say("No such line.")?,
                        Err(e) => self.report(e)?,
                    }
                }
                4 => {
                    let line = self.pick_line(sale_id)?;
                    let exists = self
                        .store
                        .sale_directory()
                        .find_by_id(sale_id)
                        .and_then(|s| s.line(line))
                        .is_some();
                    let quantity: i64 = self.prompt.number("New quantity (0 removes): ")?;
                    match self.store.sales().update_line_quantity(sale_id, line, quantity) {
                        Ok(true) => self.prompt.say("Quantity updated.")?,
                        Ok(false) if !exists => self.prompt.say("No such line.")?,
                        Ok(false) => self.prompt.say("Not enough stock for that quantity.")?,
                        Err(e) => self.report(e)?,
                    }
                }
                5 => {
                    let comment = self.prompt.line("Comment: ")?;
                    match self.store.sales().set_comment(sale_id, &comment) {
                        Ok(()) => self.prompt.say("Comment saved.")?,
                        Err(e) => self.report(e)?,
                    }
                }
                6 => self.add_products(sale_id)?,
                0 => return self.prompt.say(format!("Sale {} left open.", sale_id)),
                _ => self.invalid_option()?,
            }
        }
    }

    pub(super) fn sales_menu(&mut self) -> MenuResult {
        loop {
            let choice = self.choose(
                "Sales",
                &["List all sales", "List by state", "Show receipt", "Cancel an open sale"],
                "Back",
            )?;
            match choice {
                1 => {
                    let rows = self.sale_rows(|_| true);
                    self.print_rows("No sales yet.", rows)?
                }
                2 => {
                    let status = self.pick_status()?;
                    let rows = self.sale_rows(|s| s.status() == status);
                    self.print_rows(&format!("No {} sales.", status), rows)?
                }
                3 => {
                    let sale_id = SaleId::new(self.prompt.number("Sale id: ")?);
                    let format: u32 = self.prompt.number("Format (1 text, 2 JSON): ")?;
                    self.print_receipt(sale_id, format == 2)?
                }
                4 => {
                    let rows = self.sale_rows(|s| s.status() == SaleStatus::Processing);
                    if rows.is_empty() {
                        self.prompt.say("No open sales.")?;
                        continue;
                    }
                    self.print_rows("", rows)?;
                    let sale_id = SaleId::new(self.prompt.number("Sale id: ")?);
                    self.cancel_sale(sale_id)?;
                }
                0 => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    /// Asks for confirmation and cancels. Returns whether the sale is now
    /// closed.
    fn cancel_sale(&mut self, sale_id: SaleId) -> MenuResult<bool> {
        if !self.prompt.confirm(&format!("Cancel sale {}?", sale_id))? {
            return Ok(false);
        }
        match self.store.sales().cancel(sale_id) {
            Ok(true) => {
                self.prompt
                    .say(format!("Sale {} cancelled, stock returned.", sale_id))?;
                Ok(true)
            }
            Ok(false) => {
                self.prompt.say(format!("Sale {} was already closed.", sale_id))?;
                Ok(true)
            }
            Err(e) => {
                self.report(e)?;
                Ok(false)
            }
        }
    }

    fn pick_line(&mut self, sale_id: SaleId) -> MenuResult<LineItemId> {
        let seq: u32 = self.prompt.number("Line #: ")?;
        Ok(LineItemId::new(sale_id, seq))
    }

    fn pick_status(&mut self) -> MenuResult<SaleStatus> {
        for (i, status) in SaleStatus::ALL.iter().enumerate() {
            self.prompt.say(format!("  {}. {}", i + 1, status))?;
        }
        loop {
            let choice: usize = self.prompt.number("State: ")?;
            match choice.checked_sub(1).and_then(|i| SaleStatus::ALL.get(i)) {
                Some(status) => return Ok(*status),
                None => self.invalid_option()?,
            }
        }
    }

    fn show_sale(&mut self, sale_id: SaleId) -> MenuResult {
        let rows = sale_summary(self.store, self.config, sale_id).unwrap_or_default();
        self.print_rows("Sale not found.", rows)
    }

    fn print_receipt(&mut self, sale_id: SaleId, json: bool) -> MenuResult {
        let receipt = match self.store.sales().receipt(sale_id) {
            Ok(receipt) => receipt,
            Err(e) => return self.report(e),
        };

        if json {
            return match receipt.to_json() {
                Ok(text) => self.prompt.say(text),
                Err(e) => self.report(e),
            };
        }

        let text = receipt.render(&self.config.currency_symbol);
        let header = self.config.store_name.to_uppercase();
        self.prompt.say(header)?;
        self.prompt.say(text)
    }

    fn sale_rows<F>(&self, keep: F) -> Vec<String>
    where
        F: Fn(&Sale) -> bool,
    {
        self.store
            .sale_directory()
            .all()
            .into_iter()
            .filter(|s| keep(s))
            .map(|s| sale_row(self.store, self.config, s))
            .collect()
    }
}

fn sale_row(store: &Store, config: &ConsoleConfig, sale: &Sale) -> String {
    let customer = store
        .customer_directory()
        .find_by_id(sale.customer_id())
        .map(|c| c.name().to_string())
        .unwrap_or_else(|| format!("Customer #{}", sale.customer_id()));
    format!(
        "{:>4}  {:<25} {:<10}  items {:>3}  {:>12}  {}",
        sale.id(),
        customer,
        sale.status(),
        sale.total_units(),
        config.format_currency(sale.total().cents()),
        sale.created_at().format("%Y-%m-%d %H:%M")
    )
}

fn sale_summary(store: &Store, config: &ConsoleConfig, sale_id: SaleId) -> Option<Vec<String>> {
    let sale = store.sale_directory().find_by_id(sale_id)?;
    let catalog = store.product_catalog();
    let money = |cents: i64| config.format_currency(cents);

    let mut rows = vec![format!("--- Sale {} ({}) ---", sale.id(), sale.status())];
    if sale.is_empty() {
        rows.push("  (no items)".to_string());
    }
    for line in sale.lines() {
        let name = catalog
            .find_by_id(line.product_id())
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| format!("Product #{}", line.product_id()));
        rows.push(format!(
            "  #{:<3} {:<30} {:>3} x {:>10} = {:>12}",
            line.id().seq,
            name,
            line.quantity(),
            money(line.unit_price().cents()),
            money(line.subtotal().cents())
        ));
    }
    rows.push(format!("  Subtotal: {}", money(sale.subtotal().cents())));
    rows.push(format!("  Tax ({}): {}", sale.tax_rate(), money(sale.tax().cents())));
    rows.push(format!("  Total: {}", money(sale.total().cents())));
    if !sale.comment().is_empty() {
        rows.push(format!("  Note: {}", sale.comment()));
    }
    Some(rows)
}
