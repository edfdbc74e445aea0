//! # Sale
//!
//! The sale aggregate: an ordered list of line items, a lifecycle state and
//! derived totals. Every line operation moves product stock in lockstep.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale State Machine                              │
//! │                                                                         │
//! │   PROCESSING ──add_line / remove_line / update_line_quantity──┐         │
//! │       │  ▲                                                    │         │
//! │       │  └────────────────────────────────────────────────────┘         │
//! │       │                                                                 │
//! │       ├──finalize()──► COMPLETED   (needs at least one line)            │
//! │       │                                                                 │
//! │       └──cancel()────► CANCELLED   (every reserved unit returned)       │
//! │                                                                         │
//! │   COMPLETED / CANCELLED: terminal, nothing may change                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Order
//! Each mutating call validates first and works out the new totals, then
//! performs its only remaining fallible step (the stock adjustment), then
//! mutates the lines and stores the totals. A call that fails leaves the
//! sale and every product untouched.
//!
//! ## Return Values
//! - `Ok(true)`: the change was applied
//! - `Ok(false)`: an expected business outcome (not enough stock, unknown
//!   line, already finalized) and nothing changed
//! - `Err(_)`: the call was invalid for this input or state

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::id::{CustomerId, LineItemId, ProductId, SaleId};
use crate::line_item::SaleLineItem;
use crate::money::Money;
use crate::product::{Product, ProductLookup};
use crate::types::{SaleStatus, TaxRate};
use crate::validation::{validate_quantity, validate_tax_rate_bps};

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    subtotal: Money,
    tax: Money,
    total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    id: SaleId,
    customer_id: CustomerId,
    lines: Vec<SaleLineItem>,
    /// Last issued line sequence number. Only moves forward.
    next_line_seq: u32,
    subtotal: Money,
    tax: Money,
    total: Money,
    tax_rate: TaxRate,
    status: SaleStatus,
    comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Sale {
    /// Opens a sale for a customer, stamped with the current time.
    pub fn new(id: SaleId, customer_id: CustomerId) -> Result<Self, ValidationError> {
        Self::new_at(id, customer_id, Utc::now())
    }

    /// Opens a sale with an explicit creation timestamp.
    ///
    /// ## Errors
    /// `ValidationError` if either id is zero (absent).
    pub fn new_at(
        id: SaleId,
        customer_id: CustomerId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        id.validate()?;
        customer_id.validate()?;

        Ok(Sale {
            id,
            customer_id,
            lines: Vec::new(),
            next_line_seq: 0,
            subtotal: Money::zero(),
            tax: Money::zero(),
            total: Money::zero(),
            tax_rate: TaxRate::default(),
            status: SaleStatus::Processing,
            comment: String::new(),
            created_at,
            updated_at: created_at,
            completed_at: None,
        })
    }

    /// Builder-style tax rate override for a freshly opened sale.
    pub fn with_tax_rate(mut self, rate: TaxRate) -> Result<Self, ValidationError> {
        validate_tax_rate_bps(rate.bps())?;
        let totals = self.totals_with(None, Money::zero(), rate)?;
        self.tax_rate = rate;
        self.apply_totals(totals);
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Line items in insertion order.
    pub fn lines(&self) -> &[SaleLineItem] {
        &self.lines
    }

    pub fn line(&self, line_id: LineItemId) -> Option<&SaleLineItem> {
        self.lines.iter().find(|l| l.id() == line_id)
    }

    pub fn line_for_product(&self, product_id: ProductId) -> Option<&SaleLineItem> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines.
    pub fn total_units(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity()).sum()
    }

    // =========================================================================
    // Line Operations
    // =========================================================================

    /// Adds `quantity` units of `product`, merging into its existing line.
    ///
    /// ## Flow
    /// ```text
    /// add_line(P, q)
    ///      │
    ///      ├── sale not PROCESSING?          → Err(IllegalState)
    ///      ├── q <= 0?                       → Err(Validation)
    ///      ├── !P.check_availability(q)?     → Ok(false)
    ///      ├── new total overflows?          → Err(Validation)
    ///      │
    ///      ├── line for P exists → quantity += q
    ///      └── otherwise         → new line at P's current price
    ///      │
    ///      ▼
    /// P.adjust_stock(-q), recompute totals → Ok(true)
    /// ```
    ///
    /// Only the incremental `q` is checked and debited on a merge; the units
    /// already on the line were debited when they were added.
    pub fn add_line(&mut self, product: &mut Product, quantity: i64) -> CoreResult<bool> {
        self.ensure_open("add a line")?;
        product.id().validate()?;
        validate_quantity(quantity)?;

        if !product.check_availability(quantity) {
            return Ok(false);
        }

        let product_id = product.id();
        match self.lines.iter().position(|l| l.product_id() == product_id) {
            Some(idx) => {
                let combined = self.lines[idx]
                    .quantity()
                    .checked_add(quantity)
                    .ok_or_else(|| ValidationError::invalid_format("quantity", "too large"))?;
                let line_subtotal = self.lines[idx].subtotal_for(combined)?;
                let totals = self.totals_with(Some(idx), line_subtotal, self.tax_rate)?;

                product.adjust_stock(-quantity)?;
                self.lines[idx].set_quantity(combined)?;
                self.apply_totals(totals);
            }
            None => {
                let seq = self.next_line_seq + 1;
                let line = SaleLineItem::new(
                    LineItemId::new(self.id, seq),
                    product_id,
                    quantity,
                    product.price(),
                )?;
                let totals = self.totals_with(None, line.subtotal(), self.tax_rate)?;

                product.adjust_stock(-quantity)?;
                self.next_line_seq = seq;
                self.lines.push(line);
                self.apply_totals(totals);
            }
        }

        self.touch();
        Ok(true)
    }

    /// Removes a line and returns its units to the product.
    ///
    /// Returns `Ok(false)` if the sale has no such line.
    pub fn remove_line<L>(&mut self, line_id: LineItemId, products: &mut L) -> CoreResult<bool>
    where
        L: ProductLookup + ?Sized,
    {
        self.ensure_open("remove a line")?;

        let Some(idx) = self.lines.iter().position(|l| l.id() == line_id) else {
            return Ok(false);
        };

        let (product_id, quantity) = (self.lines[idx].product_id(), self.lines[idx].quantity());
        let totals = self.totals_with(Some(idx), Money::zero(), self.tax_rate)?;
        products
            .product_mut(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?
            .adjust_stock(quantity)?;

        self.lines.remove(idx);
        self.apply_totals(totals);
        self.touch();
        Ok(true)
    }

    /// Sets a line's quantity, moving stock by the signed difference.
    ///
    /// ## Behavior
    /// - `new_quantity <= 0`: same as [`Sale::remove_line`]
    /// - increase the product cannot cover: `Ok(false)`, nothing changes
    /// - decrease: the released units go back to stock
    pub fn update_line_quantity<L>(
        &mut self,
        line_id: LineItemId,
        new_quantity: i64,
        products: &mut L,
    ) -> CoreResult<bool>
    where
        L: ProductLookup + ?Sized,
    {
        if new_quantity <= 0 {
            return self.remove_line(line_id, products);
        }
        self.ensure_open("change a line quantity")?;

        let Some(idx) = self.lines.iter().position(|l| l.id() == line_id) else {
            return Ok(false);
        };

        let line = &self.lines[idx];
        let delta = new_quantity - line.quantity();
        if delta == 0 {
            return Ok(true);
        }
        let line_subtotal = line.subtotal_for(new_quantity)?;
        let totals = self.totals_with(Some(idx), line_subtotal, self.tax_rate)?;

        let product_id = line.product_id();
        let product = products
            .product_mut(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        if delta > 0 && !product.check_availability(delta) {
            return Ok(false);
        }
        product.adjust_stock(-delta)?;

        self.lines[idx].set_quantity(new_quantity)?;
        self.apply_totals(totals);
        self.touch();
        Ok(true)
    }

    // =========================================================================
    // Sale Attributes
    // =========================================================================

    /// Overrides the tax rate and recomputes tax and total.
    pub fn set_tax_rate(&mut self, rate: TaxRate) -> CoreResult<()> {
        self.ensure_open("change the tax rate")?;
        validate_tax_rate_bps(rate.bps())?;
        let totals = self.totals_with(None, Money::zero(), rate)?;

        self.tax_rate = rate;
        self.apply_totals(totals);
        self.touch();
        Ok(())
    }

    /// Replaces the free-text comment. Stored trimmed.
    pub fn set_comment(&mut self, comment: &str) -> CoreResult<()> {
        self.ensure_open("edit the comment")?;

        self.comment = comment.trim().to_string();
        self.touch();
        Ok(())
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Completes the sale.
    ///
    /// Returns `Ok(false)` if it was already completed. Finalizing a
    /// cancelled sale or a sale without lines is an `IllegalState` error.
    pub fn finalize(&mut self) -> CoreResult<bool> {
        match self.status {
            SaleStatus::Completed => return Ok(false),
            SaleStatus::Cancelled => {
                return Err(CoreError::illegal_state(self.id, self.status, "finalize"))
            }
            SaleStatus::Processing => {}
        }

        if self.lines.is_empty() {
            return Err(CoreError::illegal_state(
                self.id,
                self.status,
                "finalize a sale with no lines",
            ));
        }

        self.status = SaleStatus::Completed;
        let now = Utc::now();
        self.completed_at = Some(now);
        self.updated_at = now;
        Ok(true)
    }

    /// Cancels the sale, returning every reserved unit to stock.
    ///
    /// Returns `Ok(false)` if the sale is already terminal. Every product is
    /// resolved before any stock moves, so a missing product fails the call
    /// with no side effects. The lines are dropped and totals fall to zero.
    pub fn cancel<L>(&mut self, products: &mut L) -> CoreResult<bool>
    where
        L: ProductLookup + ?Sized,
    {
        if self.status.is_terminal() {
            return Ok(false);
        }

        for line in &self.lines {
            let product = products
                .product(line.product_id())
                .ok_or(CoreError::ProductNotFound(line.product_id()))?;
            if product.stock().checked_add(line.quantity()).is_none() {
                return Err(CoreError::InvalidStock {
                    product_id: product.id(),
                    stock: product.stock(),
                    delta: line.quantity(),
                });
            }
        }

        for line in &self.lines {
            if let Some(product) = products.product_mut(line.product_id()) {
                product.adjust_stock(line.quantity())?;
            }
        }

        self.lines.clear();
        self.status = SaleStatus::Cancelled;
        self.apply_totals(Totals::default());
        self.touch();
        Ok(true)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_open(&self, operation: &str) -> CoreResult<()> {
        if self.status != SaleStatus::Processing {
            return Err(CoreError::illegal_state(self.id, self.status, operation));
        }
        Ok(())
    }

    /// Totals the sale would have with line `replace` given `line_subtotal`
    /// (or with an extra line of `line_subtotal` when `replace` is `None`).
    ///
    /// subtotal = Σ line subtotals; tax = subtotal × rate (half up);
    /// total = subtotal + tax. Each step is whole cents and checked, so an
    /// amount too large for the sale fails here, before any stock moves.
    fn totals_with(
        &self,
        replace: Option<usize>,
        line_subtotal: Money,
        rate: TaxRate,
    ) -> Result<Totals, ValidationError> {
        let too_large = || ValidationError::invalid_format("total", "sale total is too large");

        let subtotal = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replace)
            .try_fold(line_subtotal, |acc, (_, l)| acc.checked_add(l.subtotal()))
            .ok_or_else(too_large)?;
        let tax = subtotal.calculate_tax(rate);
        let total = subtotal.checked_add(tax).ok_or_else(too_large)?;

        Ok(Totals { subtotal, tax, total })
    }

    fn apply_totals(&mut self, totals: Totals) {
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.total = totals.total;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
