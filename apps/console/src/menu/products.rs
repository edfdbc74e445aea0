use std::io::{BufRead, Write};

use dreams_core::{Category, Product, ProductId, ProductKind};

use super::Console;
use crate::config::ConsoleConfig;
use crate::prompt::MenuResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NewProduct {
    Electronics,
    Apparel,
    General,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub(super) fn products_menu(&mut self) -> MenuResult {
        loop {
            let choice = self.choose(
                "Products",
                &[
                    "Add electronics",
                    "Add apparel",
                    "Add general product",
                    "List products",
                    "Find product",
                    "Search products",
                    "Adjust stock",
                    "Update price",
                    "Deactivate product",
                    "Reactivate product",
                ],
                "Back",
            )?;
            match choice {
                1 => self.add_product(NewProduct::Electronics)?,
                2 => self.add_product(NewProduct::Apparel)?,
                3 => self.add_product(NewProduct::General)?,
                4 => self.list_products()?,
                5 => self.find_product()?,
                6 => self.search_products()?,
                7 => self.adjust_stock()?,
                8 => self.update_price()?,
                9 => self.set_product_active(false)?,
                10 => self.set_product_active(true)?,
                0 => return Ok(()),
                _ => self.invalid_option()?,
            }
        }
    }

    fn add_product(&mut self, new: NewProduct) -> MenuResult {
        let name = self.prompt.line("Name: ")?;
        let price = self.prompt.money("Price: ")?;
        let stock: i64 = self.prompt.number("Initial stock: ")?;

        let kind = match new {
            NewProduct::Electronics => ProductKind::Electronics {
                brand: self.prompt.line("Brand: ")?,
                model: self.prompt.line("Model: ")?,
                warranty_months: self.prompt.number("Warranty (months): ")?,
            },
            NewProduct::Apparel => ProductKind::Apparel {
                size: self.prompt.line("Size: ")?,
                color: self.prompt.line("Color: ")?,
                material: self.prompt.line("Material: ")?,
                season: self.prompt.line("Season: ")?,
            },
            NewProduct::General => ProductKind::General,
        };
        let category = match new {
            NewProduct::General => self.pick_category()?,
            _ => kind.default_category(),
        };

        match self.store.products().register(&name, price, stock, category, kind) {
            Ok(product) => self
                .prompt
                .say(format!("Product registered with id {}.", product.id())),
            Err(e) => self.report(e),
        }
    }

    fn pick_category(&mut self) -> MenuResult<Category> {
        for (i, category) in Category::ALL.iter().enumerate() {
            self.prompt
                .say(format!("  {}. {} - {}", i + 1, category, category.description()))?;
        }
        loop {
            let choice: usize = self.prompt.number("Category: ")?;
            match choice.checked_sub(1).and_then(|i| Category::ALL.get(i)) {
                Some(category) => return Ok(*category),
                None => self.invalid_option()?,
            }
        }
    }

    fn list_products(&mut self) -> MenuResult {
        let config = self.config;
        let rows = self
            .store
            .product_catalog()
            .all()
            .into_iter()
            .map(|p| product_row(config, p))
            .collect();
        self.print_rows("No products registered.", rows)
    }

    fn find_product(&mut self) -> MenuResult {
        let id = ProductId::new(self.prompt.number("Product id: ")?);
        let found = self
            .store
            .products()
            .find(id)
            .map(|p| (p.describe(), p.is_active()));
        match found {
            Ok((description, active)) => {
                self.prompt.say(description)?;
                if !active {
                    self.prompt.say("(inactive)")?;
                }
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn search_products(&mut self) -> MenuResult {
        let query = self.prompt.line("Search: ")?;
        let config = self.config;
        let found: Result<Vec<String>, _> = self
            .store
            .products()
            .search(&query)
            .map(|hits| hits.into_iter().map(|p| product_row(config, p)).collect());
        match found {
            Ok(rows) => self.print_rows("No products match.", rows),
            Err(e) => self.report(e),
        }
    }

    fn adjust_stock(&mut self) -> MenuResult {
        let id = ProductId::new(self.prompt.number("Product id: ")?);
        let delta: i64 = self.prompt.number("Change (+ received / - removed): ")?;
        match self.store.products().adjust_stock(id, delta) {
            Ok(stock) => self.prompt.say(format!("Stock is now {}.", stock)),
            Err(e) => self.report(e),
        }
    }

    fn update_price(&mut self) -> MenuResult {
        let id = ProductId::new(self.prompt.number("Product id: ")?);
        let found = self
            .store
            .products()
            .find(id)
            .map(|p| (p.name().to_string(), p.price()));
        let (name, current) = match found {
            Ok(found) => found,
            Err(e) => return self.report(e),
        };

        let current = self.money(current);
        self.prompt.say(format!("{} currently costs {}.", name, current))?;
        let price = self.prompt.money("New price: ")?;
        match self.store.products().update(id, &name, price) {
            Ok(()) => {
                let price = self.money(price);
                self.prompt.say(format!("Price updated to {}.", price))
            }
            Err(e) => self.report(e),
        }
    }

    fn set_product_active(&mut self, active: bool) -> MenuResult {
        let id = ProductId::new(self.prompt.number("Product id: ")?);
        let mut products = self.store.products();
        let result = if active {
            products.reactivate(id)
        } else {
            products.deactivate(id)
        };
        match result {
            Ok(()) if active => self.prompt.say("Product reactivated."),
            Ok(()) => self.prompt.say("Product deactivated."),
            Err(e) => self.report(e),
        }
    }
}

pub(super) fn product_row(config: &ConsoleConfig, product: &Product) -> String {
    format!(
        "{:>4}  {:<30} {:>12}  stock {:>4}  {}{}",
        product.id(),
        product.name(),
        config.format_currency(product.price().cents()),
        product.stock(),
        product.category(),
        if product.is_active() { "" } else { " (inactive)" }
    )
}

#[cfg(test)]
mod tests {
    use crate::menu::tests::session;
    use dreams_core::{Category, Money, ProductId, ProductKind};
    use dreams_store::Store;

    #[test]
    fn test_add_each_kind() {
        let mut store = Store::new();
        let script = concat!(
            "2\n",
            "1\nLaptop\n24999\n3\nLenovo\nT14\n12\n",
            "2\nChamarra\n1299.90\n5\nL\nAzul\nPoliéster\nInvierno\n",
            "3\nLámpara\n450\n4\n3\n",
            "5\n1\n",
            "0\n0\n"
        );
        let out = session(&mut store, script);

        assert!(out.contains("Product registered with id 3."));
        assert!(out.contains("Brand: Lenovo, Model: T14, Warranty: 12 months"));

        let catalog = store.product_catalog();
        let chamarra = catalog.find_by_id(ProductId::new(2)).unwrap();
        assert_eq!(chamarra.category(), Category::Clothing);
        assert_eq!(chamarra.price().cents(), 129990);
        assert_eq!(catalog.find_by_id(ProductId::new(3)).unwrap().category(), Category::Home);
    }

    #[test]
    fn test_search_stock_and_price() {
        let mut store = Store::new();
        store
            .products()
            .register("Balón", Money::from_cents(35000), 10, Category::Sports, ProductKind::General)
            .unwrap();

        let out = session(
            &mut store,
            "2\n6\nbal\n7\n1\n-4\n7\n1\n-20\n8\n1\n399.50\n9\n1\n6\nbal\n0\n0\n",
        );

        assert!(out.contains("Balón"));
        assert!(out.contains("Stock is now 6."));
        assert!(out.contains("Error: Invalid stock adjustment"));
        assert!(out.contains("Price updated to $399.50."));
        assert!(out.contains("Product deactivated."));
        assert!(out.contains("No products match."));

        let balon = store.product_catalog().find_by_id(ProductId::new(1)).unwrap();
        assert_eq!(balon.stock(), 6);
        assert!(!balon.is_active());
    }

    #[test]
    fn test_invalid_product_is_reported() {
        let mut store = Store::new();
        let out = session(&mut store, "2\n3\nGratis\n0\n1\n1\n0\n0\n");
        assert!(out.contains("Error: price must be positive"));
        assert_eq!(store.product_catalog().count(), 0);
    }
}
