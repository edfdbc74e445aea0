//! # Receipts
//!
//! A printable snapshot of a sale. Product names are resolved from the
//! catalog when the receipt is built; a product that has since been removed
//! prints as `Product #<id>`.
//!
//! ## Layout
//! ```text
//! ========================================
//! Sale #1                       completed
//! Customer: Ana (ana@example.com)
//! Date: 2024-03-01 12:00 UTC
//! ----------------------------------------
//! Audífonos
//!   2 x $299.90                   $599.80
//! ----------------------------------------
//! Subtotal                        $599.80
//! Tax (16%)                        $95.97
//! TOTAL                           $695.77
//! ========================================
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dreams_core::{Money, Sale, SaleStatus};

use crate::repository::{CustomerDirectory, ProductCatalog};

const WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub sale_id: u64,
    pub customer_name: String,
    pub customer_email: String,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub items: Vec<ReceiptItem>,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub line_id: String,
    pub product_id: u64,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl Receipt {
    pub fn build(
        sale: &Sale,
        customers: &dyn CustomerDirectory,
        products: &dyn ProductCatalog,
    ) -> Self {
        let customer = customers.find_by_id(sale.customer_id());

        Receipt {
            sale_id: sale.id().value(),
            customer_name: customer
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| format!("Customer #{}", sale.customer_id())),
            customer_email: customer.map(|c| c.email().to_string()).unwrap_or_default(),
            status: sale.status(),
            created_at: sale.created_at(),
            completed_at: sale.completed_at(),
            items: sale
                .lines()
                .iter()
                .map(|line| ReceiptItem {
                    line_id: line.id().to_string(),
                    product_id: line.product_id().value(),
                    name: products
                        .find_by_id(line.product_id())
                        .map(|p| p.name().to_string())
                        .unwrap_or_else(|| format!("Product #{}", line.product_id())),
                    quantity: line.quantity(),
                    unit_price_cents: line.unit_price().cents(),
                    line_total_cents: line.subtotal().cents(),
                })
                .collect(),
            subtotal_cents: sale.subtotal().cents(),
            tax_rate_bps: sale.tax_rate().bps(),
            tax_cents: sale.tax().cents(),
            total_cents: sale.total().cents(),
            comment: Some(sale.comment().to_string()).filter(|c| !c.is_empty()),
        }
    }

    /// Fixed-width text rendering with the given currency symbol.
    pub fn render(&self, symbol: &str) -> String {
        let money = |cents: i64| format_money(Money::from_cents(cents), symbol);
        let double = "=".repeat(WIDTH);
        let single = "-".repeat(WIDTH);

        let mut out = Vec::new();
        out.push(double.clone());
        out.push(two_columns(&format!("Sale #{}", self.sale_id), &self.status.to_string()));
        if self.customer_email.is_empty() {
            out.push(format!("Customer: {}", self.customer_name));
        } else {
            out.push(format!("Customer: {} ({})", self.customer_name, self.customer_email));
        }
        let date = self.completed_at.unwrap_or(self.created_at);
        out.push(format!("Date: {}", date.format("%Y-%m-%d %H:%M UTC")));
        out.push(single.clone());

        if self.items.is_empty() {
            out.push("(no items)".to_string());
        }
        for item in &self.items {
            out.push(item.name.clone());
            out.push(two_columns(
                &format!("  {} x {}", item.quantity, money(item.unit_price_cents)),
                &money(item.line_total_cents),
            ));
        }

        out.push(single.clone());
        out.push(two_columns("Subtotal", &money(self.subtotal_cents)));
        out.push(two_columns(
            &format!("Tax ({})", dreams_core::TaxRate::from_bps(self.tax_rate_bps)),
            &money(self.tax_cents),
        ));
        out.push(two_columns("TOTAL", &money(self.total_cents)));
        if let Some(comment) = &self.comment {
            out.push(single);
            out.push(format!("Note: {}", comment));
        }
        out.push(double);

        out.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Formats an amount as `<symbol><major>.<minor>`, e.g. `$1299.90`.
pub fn format_money(amount: Money, symbol: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        amount.major().abs(),
        amount.minor()
    )
}

fn two_columns(left: &str, right: &str) -> String {
    let pad = WIDTH.saturating_sub(left.chars().count() + right.chars().count()).max(1);
    format!("{}{}{}", left, " ".repeat(pad), right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryCustomerDirectory, InMemoryProductCatalog};
    use chrono::TimeZone;
    use dreams_core::{
        Category, Customer, CustomerId, Product, ProductId, ProductKind, ProductLookup, SaleId,
    };

    fn fixture() -> (Sale, InMemoryCustomerDirectory, InMemoryProductCatalog) {
        let mut customers = InMemoryCustomerDirectory::new();
        customers.save(Customer::new(CustomerId::new(1), "Ana", "ana@example.com").unwrap());

        let mut products = InMemoryProductCatalog::new();
        products.save(
            Product::new(
                ProductId::new(1),
                "Audífonos",
                Money::from_cents(29990),
                5,
                Category::Electronics,
                ProductKind::General,
            )
            .unwrap(),
        );

        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut sale = Sale::new_at(SaleId::new(1), CustomerId::new(1), created).unwrap();
        sale.add_line(products.product_mut(ProductId::new(1)).unwrap(), 2)
            .unwrap();
        (sale, customers, products)
    }

    #[test]
    fn test_build_resolves_names_and_totals() {
        let (sale, customers, products) = fixture();
        let receipt = Receipt::build(&sale, &customers, &products);

        assert_eq!(receipt.customer_name, "Ana");
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].line_id, "1-1");
        assert_eq!(receipt.items[0].line_total_cents, 59980);
        assert_eq!(receipt.tax_cents, 9597);
        assert_eq!(receipt.total_cents, 69577);
        assert_eq!(receipt.comment, None);
    }

    #[test]
    fn test_removed_product_falls_back_to_id() {
        let (sale, customers, mut products) = fixture();
        products.remove(ProductId::new(1));

        let receipt = Receipt::build(&sale, &customers, &products);
        assert_eq!(receipt.items[0].name, "Product #1");
    }

    #[test]
    fn test_render_text() {
        let (sale, customers, products) = fixture();
        let text = Receipt::build(&sale, &customers, &products).render("$");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], format!("Sale #1{}processing", " ".repeat(23)));
        assert_eq!(lines[2], "Customer: Ana (ana@example.com)");
        assert_eq!(lines[3], "Date: 2024-03-01 12:00 UTC");
        assert!(text.contains("Tax (16%)"));
        assert!(lines.iter().any(|l| l.starts_with("TOTAL") && l.ends_with("$695.77")));
        assert!(lines.iter().all(|l| l.chars().count() <= WIDTH));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let (sale, customers, products) = fixture();
        let json = Receipt::build(&sale, &customers, &products).to_json().unwrap();

        assert!(json.contains("\"totalCents\": 69577"));
        assert!(json.contains("\"status\": \"processing\""));
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back.items[0].name, "Audífonos");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Money::from_cents(129990), "$"), "$1299.90");
        assert_eq!(format_money(Money::from_cents(-5), "MX$"), "-MX$0.05");
    }
}
