//! # Product Service
//!
//! Catalog maintenance: registration, price and name changes, manual stock
//! adjustments and activation. Product names are unique, compared
//! case-insensitively.
//!
//! Stock moved by sales goes through the sale engine, not through
//! [`ProductService::adjust_stock`]; that method is for receiving goods
//! and shrinkage.

use tracing::{debug, info};

use dreams_core::validation::{
    validate_price, validate_product_name, validate_search_query, validate_stock,
};
use dreams_core::{Category, IdGenerator, Money, Product, ProductId, ProductKind, ProductLookup};

use crate::error::{StoreError, StoreResult};
use crate::repository::ProductCatalog;

pub struct ProductService<'a> {
    products: &'a mut dyn ProductCatalog,
    ids: &'a mut dyn IdGenerator,
}

impl<'a> ProductService<'a> {
    pub fn new(products: &'a mut dyn ProductCatalog, ids: &'a mut dyn IdGenerator) -> Self {
        ProductService { products, ids }
    }

    /// Registers a new active product.
    ///
    /// ## Errors
    /// - `Validation` for a blank name, non-positive price or negative stock
    /// - `Duplicate` if another product already has this name
    pub fn register(
        &mut self,
        name: &str,
        price: Money,
        stock: i64,
        category: Category,
        kind: ProductKind,
    ) -> StoreResult<Product> {
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock(stock)?;
        self.ensure_name_free(name, None)?;

        let product = Product::new(self.ids.next_product_id(), name, price, stock, category, kind)?;
        info!(
            product_id = %product.id(),
            name = %product.name(),
            price = %product.price(),
            stock = product.stock(),
            "Product registered"
        );

        self.products.save(product.clone());
        Ok(product)
    }

    pub fn find(&self, id: ProductId) -> StoreResult<&Product> {
        self.products
            .find_by_id(id)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    pub fn list(&self) -> Vec<&Product> {
        self.products.all()
    }

    pub fn list_active(&self) -> Vec<&Product> {
        self.products.active()
    }

    pub fn list_in_stock(&self) -> Vec<&Product> {
        self.products.in_stock()
    }

    /// Searches active products by name. An empty query lists every active
    /// product.
    pub fn search(&self, query: &str) -> StoreResult<Vec<&Product>> {
        let query = validate_search_query(query)?;
        debug!(query = %query, "Searching products");

        if query.is_empty() {
            return Ok(self.list_active());
        }

        let results: Vec<&Product> = self
            .products
            .search_by_name(&query)
            .into_iter()
            .filter(|p| p.is_active())
            .collect();
        debug!(count = results.len(), "Search returned products");
        Ok(results)
    }

    /// Renames and reprices a product. Lines already on a sale keep the
    /// price they were added at.
    pub fn update(&mut self, id: ProductId, name: &str, price: Money) -> StoreResult<()> {
        validate_product_name(name)?;
        validate_price(price)?;
        self.ensure_name_free(name, Some(id))?;

        let product = self.product_mut(id)?;
        product.set_name(name)?;
        product.set_price(price)?;

        info!(product_id = %id, price = %price, "Product updated");
        Ok(())
    }

    /// Applies a signed stock change and returns the new level.
    pub fn adjust_stock(&mut self, id: ProductId, delta: i64) -> StoreResult<i64> {
        let stock = self.product_mut(id)?.adjust_stock(delta)?;
        info!(product_id = %id, delta, stock, "Stock adjusted");
        Ok(stock)
    }

    pub fn deactivate(&mut self, id: ProductId) -> StoreResult<()> {
        self.product_mut(id)?.set_active(false);
        info!(product_id = %id, "Product deactivated");
        Ok(())
    }

    pub fn reactivate(&mut self, id: ProductId) -> StoreResult<()> {
        self.product_mut(id)?.set_active(true);
        info!(product_id = %id, "Product reactivated");
        Ok(())
    }

    pub fn check_availability(&self, id: ProductId, quantity: i64) -> StoreResult<bool> {
        Ok(self.find(id)?.check_availability(quantity))
    }

    fn product_mut(&mut self, id: ProductId) -> StoreResult<&mut Product> {
        self.products
            .product_mut(id)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    fn ensure_name_free(&self, name: &str, owner: Option<ProductId>) -> StoreResult<()> {
        let name = name.trim();
        let taken = self
            .products
            .all()
            .into_iter()
            .any(|p| p.name().to_lowercase() == name.to_lowercase() && Some(p.id()) != owner);

        if taken {
            return Err(StoreError::duplicate("product name", name));
        }
        Ok(())
    }
}
