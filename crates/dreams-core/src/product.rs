//! # Product
//!
//! Catalog entries and the stock rules the sale engine relies on.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Stock                                    │
//! │                                                                         │
//! │  Sale::add_line(P, 3) ──► check_availability(3) ──► adjust_stock(-3)    │
//! │                                                                         │
//! │  Sale::remove_line / cancel ─────────────────────► adjust_stock(+qty)   │
//! │                                                                         │
//! │  INVARIANT: stock >= 0 after every call                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Specialised products are a closed set, so they are modelled as
//! [`ProductKind`] variants and rendered by a single [`Product::describe`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::id::ProductId;
use crate::money::Money;
use crate::types::Category;
use crate::validation::{validate_price, validate_product_name, validate_stock};

// =============================================================================
// Product Kind
// =============================================================================

/// Variant-specific attributes of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    Electronics {
        brand: String,
        model: String,
        warranty_months: u32,
    },
    Apparel {
        size: String,
        color: String,
        material: String,
        season: String,
    },
    General,
}

impl ProductKind {
    /// Category a product of this kind is filed under when none is given.
    pub fn default_category(&self) -> Category {
        match self {
            ProductKind::Electronics { .. } => Category::Electronics,
            ProductKind::Apparel { .. } => Category::Clothing,
            ProductKind::General => Category::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Electronics { .. } => "Electronics",
            ProductKind::Apparel { .. } => "Apparel",
            ProductKind::General => "General",
        }
    }
}

impl Default for ProductKind {
    fn default() -> Self {
        ProductKind::General
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    stock: i64,
    active: bool,
    category: Category,
    kind: ProductKind,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an active product.
    ///
    /// ## Errors
    /// `ValidationError` if the id is zero, the name is blank, the price is
    /// not positive or the stock is negative.
    pub fn new(
        id: ProductId,
        name: &str,
        price: Money,
        stock: i64,
        category: Category,
        kind: ProductKind,
    ) -> Result<Self, ValidationError> {
        id.validate()?;
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;

        let now = Utc::now();
        Ok(Product {
            id,
            name: name.trim().to_string(),
            price,
            stock,
            active: true,
            category,
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current price. Lines snapshot this value when they are created.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True iff the product is active, `quantity` is positive and stock covers it.
    pub fn check_availability(&self, quantity: i64) -> bool {
        self.active && quantity > 0 && self.stock >= quantity
    }

    /// Applies a signed stock change and returns the new stock level.
    ///
    /// ## Errors
    /// `InvalidStock` if the result would be negative. Nothing changes.
    pub fn adjust_stock(&mut self, delta: i64) -> CoreResult<i64> {
        let new_stock = self
            .stock
            .checked_add(delta)
            .filter(|s| *s >= 0)
            .ok_or(CoreError::InvalidStock {
                product_id: self.id,
                stock: self.stock,
                delta,
            })?;

        self.stock = new_stock;
        self.touch();
        Ok(new_stock)
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        validate_product_name(name)?;
        self.name = name.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Changes the price. Existing sale lines keep their snapshot.
    pub fn set_price(&mut self, price: Money) -> Result<(), ValidationError> {
        validate_price(price)?;
        self.price = price;
        self.touch();
        Ok(())
    }

    pub fn set_stock(&mut self, stock: i64) -> Result<(), ValidationError> {
        validate_stock(stock)?;
        self.stock = stock;
        self.touch();
        Ok(())
    }

    /// Soft activation toggle; products are never deleted while referenced.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.touch();
    }

    /// One-line human-readable description, dispatched on the kind.
    ///
    /// ## Example
    /// ```rust
    /// use dreams_core::{Category, Money, Product, ProductId, ProductKind};
    ///
    /// let tv = Product::new(
    ///     ProductId::new(1),
    ///     "Smart TV 50\"",
    ///     Money::from_cents(899900),
    ///     4,
    ///     Category::Electronics,
    ///     ProductKind::Electronics {
    ///         brand: "Hisense".into(),
    ///         model: "A6".into(),
    ///         warranty_months: 12,
    ///     },
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     tv.describe(),
    ///     "Electronics: Smart TV 50\" - Brand: Hisense, Model: A6, Warranty: 12 months, Price: $8999.00, Stock: 4"
    /// );
    /// ```
    pub fn describe(&self) -> String {
        let details = match &self.kind {
            ProductKind::Electronics {
                brand,
                model,
                warranty_months,
            } => format!(
                "Electronics: {} - Brand: {}, Model: {}, Warranty: {} months",
                self.name, brand, model, warranty_months
            ),
            ProductKind::Apparel {
                size,
                color,
                material,
                season,
            } => format!(
                "Apparel: {} - Size: {}, Color: {}, Material: {}, Season: {}",
                self.name, size, color, material, season
            ),
            ProductKind::General => format!("{}: {}", self.category, self.name),
        };

        format!("{}, Price: {}, Stock: {}", details, self.price, self.stock)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Product Lookup
// =============================================================================

/// Resolves products by id so a sale can credit stock for lines it only
/// knows by product id.
pub trait ProductLookup {
    fn product(&self, id: ProductId) -> Option<&Product>;
    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product>;
}

impl ProductLookup for HashMap<ProductId, Product> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.get_mut(&id)
    }
}

impl ProductLookup for BTreeMap<ProductId, Product> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.get(&id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.get_mut(&id)
    }
}

impl ProductLookup for Vec<Product> {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.iter().find(|p| p.id == id)
    }

    fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.iter_mut().find(|p| p.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(price_cents: i64, stock: i64) -> Product {
        Product::new(
            ProductId::new(1),
            "Camiseta",
            Money::from_cents(price_cents),
            stock,
            Category::Clothing,
            ProductKind::Apparel {
                size: "M".into(),
                color: "Azul".into(),
                material: "Algodón".into(),
                season: "Verano".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_validates_fields() {
        let kind = ProductKind::General;
        let price = Money::from_cents(100);
        assert!(Product::new(ProductId::new(0), "x", price, 1, Category::Home, kind.clone()).is_err());
        assert!(Product::new(ProductId::new(1), " ", price, 1, Category::Home, kind.clone()).is_err());
        assert!(Product::new(ProductId::new(1), "x", Money::zero(), 1, Category::Home, kind.clone()).is_err());
        assert!(Product::new(ProductId::new(1), "x", price, -1, Category::Home, kind.clone()).is_err());

        let product = Product::new(ProductId::new(1), "  Lámpara ", price, 0, Category::Home, kind).unwrap();
        assert_eq!(product.name(), "Lámpara");
        assert!(product.is_active());
    }

    #[test]
    fn test_check_availability() {
        let mut product = test_product(1000, 5);
        assert!(product.check_availability(5));
        assert!(!product.check_availability(6));
        assert!(!product.check_availability(0));
        assert!(!product.check_availability(-1));

        product.set_active(false);
        assert!(!product.check_availability(1));
    }

    #[test]
    fn test_adjust_stock_never_goes_negative() {
        let mut product = test_product(1000, 5);
        assert_eq!(product.adjust_stock(-3), Ok(2));
        assert_eq!(product.adjust_stock(4), Ok(6));

        let err = product.adjust_stock(-7).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStock { stock: 6, delta: -7, .. }));
        assert_eq!(product.stock(), 6);

        assert!(product.adjust_stock(i64::MAX).is_err());
        assert_eq!(product.stock(), 6);
    }

    #[test]
    fn test_setters_validate() {
        let mut product = test_product(1000, 5);
        assert!(product.set_price(Money::zero()).is_err());
        assert_eq!(product.price().cents(), 1000);
        product.set_price(Money::from_cents(1250)).unwrap();
        assert_eq!(product.price().cents(), 1250);

        assert!(product.set_stock(-1).is_err());
        product.set_stock(0).unwrap();
        assert_eq!(product.stock(), 0);
    }

    #[test]
    fn test_describe_dispatches_on_kind() {
        let shirt = test_product(19990, 3);
        assert_eq!(
            shirt.describe(),
            "Apparel: Camiseta - Size: M, Color: Azul, Material: Algodón, Season: Verano, Price: $199.90, Stock: 3"
        );

        let general = Product::new(
            ProductId::new(2),
            "Balón",
            Money::from_cents(35000),
            7,
            Category::Sports,
            ProductKind::General,
        )
        .unwrap();
        assert_eq!(general.describe(), "Sports: Balón, Price: $350.00, Stock: 7");
    }

    #[test]
    fn test_lookup_impls() {
        let product = test_product(1000, 5);
        let mut list = vec![product.clone()];
        assert!(list.product(ProductId::new(1)).is_some());
        assert!(list.product_mut(ProductId::new(9)).is_none());

        let mut map: HashMap<ProductId, Product> = HashMap::new();
        map.insert(product.id(), product);
        assert_eq!(map.product_mut(ProductId::new(1)).map(|p| p.stock()), Some(5));
    }
}
