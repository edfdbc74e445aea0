//! # Demo Data
//!
//! A small fixed catalog and two customers so a fresh console session has
//! something to sell.
//!
//! ## Generated Records
//! - Electronics with brand, model and warranty
//! - Apparel with size, color, material and season
//! - A few general items across the remaining categories
//! - Two customers
//!
//! Seeding is skipped when the catalog already has products.

use tracing::{info, warn};

use dreams_core::{Category, Money, ProductKind};

use crate::error::StoreResult;
use crate::store::Store;

/// (name, price in cents, stock, brand, model, warranty months)
const ELECTRONICS: &[(&str, i64, i64, &str, &str, u32)] = &[
    ("Laptop Pro 14", 2_499_900, 5, "Lenovo", "ThinkPad T14", 12),
    ("Smartphone X", 1_299_900, 10, "Samsung", "Galaxy S23", 12),
    ("Audífonos Inalámbricos", 299_900, 25, "Sony", "WH-1000XM5", 6),
    ("Monitor 27\"", 549_900, 8, "LG", "27UL500", 24),
];

/// (name, price in cents, stock, size, color, material, season)
const APPAREL: &[(&str, i64, i64, &str, &str, &str, &str)] = &[
    ("Camiseta Básica", 19_900, 40, "M", "Blanco", "Algodón", "Todo el año"),
    ("Chamarra Impermeable", 129_900, 12, "L", "Azul Marino", "Poliéster", "Invierno"),
    ("Jeans Slim", 69_900, 20, "32", "Índigo", "Mezclilla", "Todo el año"),
];

/// (name, price in cents, stock, category)
const GENERAL: &[(&str, i64, i64, Category)] = &[
    ("Lámpara de Escritorio", 45_000, 15, Category::Home),
    ("Balón de Fútbol", 35_000, 30, Category::Sports),
    ("Crema Hidratante", 18_500, 50, Category::Beauty),
    ("Novela Cien Años de Soledad", 32_900, 18, Category::Books),
    ("Rompecabezas 1000 piezas", 27_500, 10, Category::Toys),
    ("Café de Chiapas 500g", 16_000, 60, Category::Food),
    ("Aceite de Motor 1L", 21_000, 24, Category::Automotive),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("María González", "maria.gonzalez@example.com"),
    ("Juan Pérez", "juan.perez@example.com"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub products: usize,
    pub customers: usize,
}

/// Registers the demo catalog and customers.
pub fn demo_catalog(store: &mut Store) -> StoreResult<SeedSummary> {
    let existing = store.product_catalog().count();
    if existing > 0 {
        warn!(existing, "Catalog already has products, skipping demo data");
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();
    let mut products = store.products();

    for &(name, cents, stock, brand, model, warranty_months) in ELECTRONICS {
        let kind = ProductKind::Electronics {
            brand: brand.to_string(),
            model: model.to_string(),
            warranty_months,
        };
        products.register(name, Money::from_cents(cents), stock, Category::Electronics, kind)?;
        summary.products += 1;
    }

    for &(name, cents, stock, size, color, material, season) in APPAREL {
        let kind = ProductKind::Apparel {
            size: size.to_string(),
            color: color.to_string(),
            material: material.to_string(),
            season: season.to_string(),
        };
        products.register(name, Money::from_cents(cents), stock, Category::Clothing, kind)?;
        summary.products += 1;
    }

    for &(name, cents, stock, category) in GENERAL {
        products.register(name, Money::from_cents(cents), stock, category, ProductKind::General)?;
        summary.products += 1;
    }

    let mut customers = store.customers();
    for &(name, email) in CUSTOMERS {
        customers.register(name, email)?;
        summary.customers += 1;
    }

    info!(
        products = summary.products,
        customers = summary.customers,
        "Demo data loaded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_covers_every_kind() {
        let mut store = Store::new();
        let summary = demo_catalog(&mut store).unwrap();

        assert_eq!(summary.products, ELECTRONICS.len() + APPAREL.len() + GENERAL.len());
        assert_eq!(summary.customers, 2);

        let catalog = store.product_catalog();
        let all = catalog.all();
        assert!(all.iter().any(|p| matches!(p.kind(), ProductKind::Electronics { .. })));
        assert!(all.iter().any(|p| matches!(p.kind(), ProductKind::Apparel { .. })));
        assert!(all.iter().all(|p| p.is_active() && p.stock() > 0));
    }

    #[test]
    fn test_seeding_twice_is_a_no_op() {
        let mut store = Store::new();
        demo_catalog(&mut store).unwrap();
        let before = store.product_catalog().count();

        assert_eq!(demo_catalog(&mut store).unwrap(), SeedSummary::default());
        assert_eq!(store.product_catalog().count(), before);
        assert_eq!(store.customer_directory().count(), 2);
    }

    #[test]
    fn test_demo_products_describe_themselves() {
        let mut store = Store::new();
        demo_catalog(&mut store).unwrap();

        let hits = store.products().search("laptop").unwrap().len();
        assert_eq!(hits, 1);
        let laptop = store.product_catalog().find_by_id(dreams_core::ProductId::new(1)).unwrap();
        assert!(laptop.describe().contains("Brand: Lenovo"));
    }
}
