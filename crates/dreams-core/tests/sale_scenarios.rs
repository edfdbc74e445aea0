//! End-to-end sale scenarios against a small in-memory catalog.

use std::collections::BTreeMap;

use dreams_core::{
    Category, CoreError, CustomerId, IdGenerator, Money, Product, ProductId, ProductKind,
    ProductLookup, Sale, SaleStatus, SequentialIds,
};

struct Fixture {
    ids: SequentialIds,
    products: BTreeMap<ProductId, Product>,
}

impl Fixture {
    fn new() -> Self {
        Fixture {
            ids: SequentialIds::new(),
            products: BTreeMap::new(),
        }
    }

    fn product(&mut self, price: &str, stock: i64) -> ProductId {
        let id = self.ids.next_product_id();
        let product = Product::new(
            id,
            &format!("Producto {}", id),
            price.parse::<Money>().unwrap(),
            stock,
            Category::Other,
            ProductKind::General,
        )
        .unwrap();
        self.products.insert(id, product);
        id
    }

    fn sale(&mut self) -> Sale {
        Sale::new(self.ids.next_sale_id(), CustomerId::new(1)).unwrap()
    }

    fn add(&mut self, sale: &mut Sale, product: ProductId, qty: i64) -> Result<bool, CoreError> {
        let p = self.products.product_mut(product).unwrap();
        sale.add_line(p, qty)
    }

    fn stock(&self, product: ProductId) -> i64 {
        self.products[&product].stock()
    }
}

#[test]
fn test_insufficient_stock_leaves_everything_unchanged() {
    let mut fx = Fixture::new();
    let p = fx.product("10.00", 5);
    let mut sale = fx.sale();

    assert_eq!(fx.add(&mut sale, p, 3), Ok(true));
    assert_eq!(fx.stock(p), 2);
    assert_eq!(sale.subtotal(), Money::from_cents(3000));

    assert_eq!(fx.add(&mut sale, p, 10), Ok(false));
    assert_eq!(fx.stock(p), 2);
    assert_eq!(sale.status(), SaleStatus::Processing);
    assert_eq!(sale.lines()[0].quantity(), 3);
}

#[test]
fn test_repeated_product_merges_without_double_debit() {
    let mut fx = Fixture::new();
    let p = fx.product("4.50", 10);
    let mut sale = fx.sale();

    fx.add(&mut sale, p, 2).unwrap();
    fx.add(&mut sale, p, 1).unwrap();

    assert_eq!(sale.line_count(), 1);
    assert_eq!(sale.lines()[0].quantity(), 3);
    assert_eq!(fx.stock(p), 7);
    assert_eq!(sale.subtotal(), Money::from_cents(1350));
}

#[test]
fn test_empty_sale_cannot_be_finalized() {
    let mut fx = Fixture::new();
    let mut sale = fx.sale();

    let err = sale.finalize().unwrap_err();
    assert!(matches!(err, CoreError::IllegalState { .. }));
    assert_eq!(sale.status(), SaleStatus::Processing);
}

#[test]
fn test_cancel_restores_each_product_and_locks_the_sale() {
    let mut fx = Fixture::new();
    let p1 = fx.product("10.00", 4);
    let p2 = fx.product("2.99", 2);
    let mut sale = fx.sale();

    fx.add(&mut sale, p1, 2).unwrap();
    fx.add(&mut sale, p2, 1).unwrap();
    assert_eq!((fx.stock(p1), fx.stock(p2)), (2, 1));

    assert_eq!(sale.cancel(&mut fx.products), Ok(true));
    assert_eq!((fx.stock(p1), fx.stock(p2)), (4, 2));
    assert_eq!(sale.status(), SaleStatus::Cancelled);

    let err = fx.add(&mut sale, p1, 1).unwrap_err();
    assert!(matches!(
        err,
        CoreError::IllegalState {
            status: SaleStatus::Cancelled,
            ..
        }
    ));
}

#[test]
fn test_totals_with_iva() {
    let mut fx = Fixture::new();
    let p1 = fx.product("199.90", 10);
    let p2 = fx.product("35.55", 10);
    let mut sale = fx.sale();

    fx.add(&mut sale, p1, 2).unwrap();
    fx.add(&mut sale, p2, 3).unwrap();

    // 399.80 + 106.65 = 506.45; 16% = 81.032 → 81.03
    assert_eq!(sale.subtotal(), Money::from_cents(50645));
    assert_eq!(sale.tax(), Money::from_cents(8103));
    assert_eq!(sale.total(), Money::from_cents(58748));
}

#[test]
fn test_completed_sale_keeps_its_stock() {
    let mut fx = Fixture::new();
    let p = fx.product("1.00", 3);
    let mut sale = fx.sale();

    fx.add(&mut sale, p, 3).unwrap();
    assert_eq!(sale.finalize(), Ok(true));
    assert_eq!(sale.cancel(&mut fx.products), Ok(false));
    assert_eq!(fx.stock(p), 0);
    assert_eq!(sale.status(), SaleStatus::Completed);
}

#[test]
fn test_sales_get_distinct_ids() {
    let mut fx = Fixture::new();
    let a = fx.sale();
    let b = fx.sale();
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_sale_total_too_large_is_rejected_before_stock_moves() {
    let mut fx = Fixture::new();
    let p1 = fx.product("50000000000000000.00", 1);
    let p2 = fx.product("50000000000000000.00", 1);
    let mut sale = fx.sale();

    assert_eq!(fx.add(&mut sale, p1, 1), Ok(true));
    let total = sale.total();

    let err = fx.add(&mut sale, p2, 1).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(fx.stock(p2), 1);
    assert_eq!(sale.line_count(), 1);
    assert_eq!(sale.total(), total);
}
