//! # Sale Service
//!
//! Orchestrates sales across the three directories. Cross-record rules
//! live here: the customer must be active to open a sale and a product must
//! be active to be added. Everything about lines, stock and totals is
//! delegated to [`Sale`].
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Flow                                       │
//! │                                                                         │
//! │  start_sale(customer) ──► customer active? ──► Sale (PROCESSING)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_product(sale, product, qty) ──► product active? ──► Sale::add_line │
//! │       │                                                                 │
//! │       ├──► finalize(sale) ──► COMPLETED                                 │
//! │       └──► cancel(sale)   ──► CANCELLED (stock returned)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use dreams_core::{
    CustomerId, IdGenerator, LineItemId, ProductId, ProductLookup, Sale, SaleId, SaleStatus,
    TaxRate,
};

use crate::error::{StoreError, StoreResult};
use crate::receipt::Receipt;
use crate::repository::{CustomerDirectory, ProductCatalog, SaleDirectory};

pub struct SaleService<'a> {
    sales: &'a mut dyn SaleDirectory,
    products: &'a mut dyn ProductCatalog,
    customers: &'a dyn CustomerDirectory,
    ids: &'a mut dyn IdGenerator,
    default_tax_rate: TaxRate,
}

impl<'a> SaleService<'a> {
    pub fn new(
        sales: &'a mut dyn SaleDirectory,
        products: &'a mut dyn ProductCatalog,
        customers: &'a dyn CustomerDirectory,
        ids: &'a mut dyn IdGenerator,
        default_tax_rate: TaxRate,
    ) -> Self {
        SaleService {
            sales,
            products,
            customers,
            ids,
            default_tax_rate,
        }
    }

    /// Opens a sale for an active customer at the default tax rate.
    pub fn start_sale(&mut self, customer_id: CustomerId) -> StoreResult<SaleId> {
        customer_id.validate()?;
        let customer = self
            .customers
            .find_by_id(customer_id)
            .ok_or_else(|| StoreError::not_found("Customer", customer_id))?;
        if !customer.is_active() {
            return Err(StoreError::inactive("Customer", customer_id));
        }

        let sale = Sale::new(self.ids.next_sale_id(), customer_id)?
            .with_tax_rate(self.default_tax_rate)?;
        let sale_id = sale.id();
        self.sales.save(sale);

        info!(sale_id = %sale_id, customer_id = %customer_id, "Sale started");
        Ok(sale_id)
    }

    /// Adds units of an active product to an open sale.
    ///
    /// ## Returns
    /// `Ok(false)` if the product does not have enough stock.
    pub fn add_product(
        &mut self,
        sale_id: SaleId,
        product_id: ProductId,
        quantity: i64,
    ) -> StoreResult<bool> {
        let sale = self
            .sales
            .find_by_id_mut(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))?;
        let product = self
            .products
            .product_mut(product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;
        if !product.is_active() {
            return Err(StoreError::inactive("Product", product_id));
        }

        let added = sale.add_line(product, quantity)?;
        if added {
            info!(
                sale_id = %sale_id,
                product_id = %product_id,
                quantity,
                stock = product.stock(),
                total = %sale.total(),
                "Line added"
            );
        } else {
            warn!(
                sale_id = %sale_id,
                product_id = %product_id,
                quantity,
                stock = product.stock(),
                "Insufficient stock"
            );
        }
        Ok(added)
    }

    /// Removes a line, returning its units to stock.
    pub fn remove_line(&mut self, sale_id: SaleId, line_id: LineItemId) -> StoreResult<bool> {
        let sale = self
            .sales
            .find_by_id_mut(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))?;

        let removed = sale.remove_line(line_id, &mut *self.products)?;
        debug!(sale_id = %sale_id, line_id = %line_id, removed, "Remove line");
        if removed {
            info!(sale_id = %sale_id, line_id = %line_id, total = %sale.total(), "Line removed");
        }
        Ok(removed)
    }

    /// Changes a line's quantity; zero or less removes it.
    pub fn update_line_quantity(
        &mut self,
        sale_id: SaleId,
        line_id: LineItemId,
        quantity: i64,
    ) -> StoreResult<bool> {
        let sale = self
            .sales
            .find_by_id_mut(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))?;

        let updated = sale.update_line_quantity(line_id, quantity, &mut *self.products)?;
        if updated {
            info!(sale_id = %sale_id, line_id = %line_id, quantity, total = %sale.total(), "Line quantity changed");
        } else {
            debug!(sale_id = %sale_id, line_id = %line_id, quantity, "Line quantity unchanged");
        }
        Ok(updated)
    }

    pub fn set_tax_rate(&mut self, sale_id: SaleId, rate: TaxRate) -> StoreResult<()> {
        self.sale_mut(sale_id)?.set_tax_rate(rate)?;
        info!(sale_id = %sale_id, rate = %rate, "Tax rate changed");
        Ok(())
    }

    pub fn set_comment(&mut self, sale_id: SaleId, comment: &str) -> StoreResult<()> {
        self.sale_mut(sale_id)?.set_comment(comment)?;
        debug!(sale_id = %sale_id, "Comment updated");
        Ok(())
    }

    /// Completes a sale. `Ok(false)` if it was already completed.
    pub fn finalize(&mut self, sale_id: SaleId) -> StoreResult<bool> {
        let sale = self.sale_mut(sale_id)?;
        let finalized = sale.finalize()?;
        if finalized {
            info!(
                sale_id = %sale_id,
                lines = sale.line_count(),
                total = %sale.total(),
                "Sale finalized"
            );
        }
        Ok(finalized)
    }

    /// Cancels an open sale. `Ok(false)` if it was already terminal.
    pub fn cancel(&mut self, sale_id: SaleId) -> StoreResult<bool> {
        let sale = self
            .sales
            .find_by_id_mut(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))?;
        let units = sale.total_units();

        let cancelled = sale.cancel(&mut *self.products)?;
        if cancelled {
            info!(sale_id = %sale_id, units_returned = units, "Sale cancelled");
        }
        Ok(cancelled)
    }

    pub fn find(&self, sale_id: SaleId) -> StoreResult<&Sale> {
        self.sales
            .find_by_id(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))
    }

    pub fn list(&self) -> Vec<&Sale> {
        self.sales.all()
    }

    pub fn list_by_state(&self, status: SaleStatus) -> Vec<&Sale> {
        self.sales.find_by_state(status)
    }

    pub fn list_by_customer(&self, customer_id: CustomerId) -> Vec<&Sale> {
        self.sales.find_by_customer(customer_id)
    }

    pub fn list_by_date_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<&Sale> {
        self.sales.find_by_date_range(from, to)
    }

    /// Builds the printable receipt of a sale.
    pub fn receipt(&self, sale_id: SaleId) -> StoreResult<Receipt> {
        let sale = self.find(sale_id)?;
        Ok(Receipt::build(sale, self.customers, &*self.products))
    }

    fn sale_mut(&mut self, sale_id: SaleId) -> StoreResult<&mut Sale> {
        self.sales
            .find_by_id_mut(sale_id)
            .ok_or_else(|| StoreError::not_found("Sale", sale_id))
    }
}
