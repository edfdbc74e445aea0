//! Property tests for the sale engine: totals stay consistent and stock is
//! conserved across arbitrary sequences of line operations.

use std::collections::HashMap;

use dreams_core::{
    Category, CustomerId, LineItemId, Money, Product, ProductId, ProductKind, ProductLookup,
    Sale, SaleId, SaleLineItem, SaleStatus, TaxRate,
};
use proptest::prelude::*;

const INITIAL_STOCK: [i64; 3] = [5, 12, 0];

#[derive(Debug, Clone)]
enum Op {
    Add { product: usize, qty: i64 },
    Remove { line: usize },
    Update { line: usize, qty: i64 },
    SetTax { bps: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..INITIAL_STOCK.len(), 1i64..8).prop_map(|(product, qty)| Op::Add { product, qty }),
        1 => (0usize..4).prop_map(|line| Op::Remove { line }),
        2 => (0usize..4, -1i64..10).prop_map(|(line, qty)| Op::Update { line, qty }),
        1 => (0u32..=3000).prop_map(|bps| Op::SetTax { bps }),
    ]
}

fn catalog(prices: &[i64]) -> HashMap<ProductId, Product> {
    prices
        .iter()
        .zip(INITIAL_STOCK)
        .enumerate()
        .map(|(i, (price, stock))| {
            let id = ProductId::new(i as u64 + 1);
            let product = Product::new(
                id,
                &format!("Producto {}", i + 1),
                Money::from_cents(*price),
                stock,
                Category::Other,
                ProductKind::General,
            )
            .unwrap();
            (id, product)
        })
        .collect()
}

fn product_id(idx: usize) -> ProductId {
    ProductId::new(idx as u64 + 1)
}

fn line_at(sale: &Sale, idx: usize) -> LineItemId {
    // past the end points at a line that does not exist
    sale.lines()
        .get(idx)
        .map(|l| l.id())
        .unwrap_or(LineItemId::new(sale.id(), 999))
}

fn apply(sale: &mut Sale, products: &mut HashMap<ProductId, Product>, op: &Op) {
    match *op {
        Op::Add { product, qty } => {
            let p = products.product_mut(product_id(product)).unwrap();
            sale.add_line(p, qty).unwrap();
        }
        Op::Remove { line } => {
            let line_id = line_at(sale, line);
            sale.remove_line(line_id, products).unwrap();
        }
        Op::Update { line, qty } => {
            let line_id = line_at(sale, line);
            sale.update_line_quantity(line_id, qty, products).unwrap();
        }
        Op::SetTax { bps } => sale.set_tax_rate(TaxRate::from_bps(bps)).unwrap(),
    }
}

fn assert_totals_consistent(sale: &Sale) {
    let subtotal: i64 = sale.lines().iter().map(|l| l.subtotal().cents()).sum();
    let expected_tax = (subtotal as i128 * sale.tax_rate().bps() as i128 + 5000) / 10000;

    assert_eq!(sale.subtotal().cents(), subtotal);
    assert_eq!(sale.tax().cents() as i128, expected_tax);
    assert_eq!(sale.total(), sale.subtotal() + sale.tax());
}

fn assert_stock_conserved(sale: &Sale, products: &HashMap<ProductId, Product>) {
    for (idx, initial) in INITIAL_STOCK.iter().enumerate() {
        let id = product_id(idx);
        let reserved = sale.line_for_product(id).map(|l| l.quantity()).unwrap_or(0);
        let stock = products[&id].stock();

        assert!(stock >= 0);
        assert_eq!(stock + reserved, *initial);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: a line's subtotal is exactly price × quantity.
    #[test]
    fn line_subtotal_is_price_times_quantity(price in 1i64..10_000_000, qty in 1i64..10_000) {
        let line = SaleLineItem::new(
            LineItemId::new(SaleId::new(1), 1),
            ProductId::new(1),
            qty,
            Money::from_cents(price),
        )
        .unwrap();
        prop_assert_eq!(line.subtotal().cents(), price * qty);
    }

    /// Property: totals are consistent and stock is conserved after every call.
    #[test]
    fn totals_and_stock_hold_after_every_operation(
        prices in proptest::collection::vec(1i64..100_000, INITIAL_STOCK.len()),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut products = catalog(&prices);
        let mut sale = Sale::new(SaleId::new(1), CustomerId::new(1)).unwrap();

        for op in &ops {
            apply(&mut sale, &mut products, op);
            assert_totals_consistent(&sale);
            assert_stock_conserved(&sale, &products);
        }
    }

    /// Property: cancelling returns every reserved unit.
    #[test]
    fn cancel_restores_initial_stock(
        prices in proptest::collection::vec(1i64..100_000, INITIAL_STOCK.len()),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut products = catalog(&prices);
        let mut sale = Sale::new(SaleId::new(1), CustomerId::new(1)).unwrap();
        for op in &ops {
            apply(&mut sale, &mut products, op);
        }

        prop_assert_eq!(sale.cancel(&mut products), Ok(true));
        for (idx, initial) in INITIAL_STOCK.iter().enumerate() {
            prop_assert_eq!(products[&product_id(idx)].stock(), *initial);
        }
        prop_assert_eq!(sale.status(), SaleStatus::Cancelled);
        prop_assert!(sale.total().is_zero());
    }

    /// Property: finalize answers true once, then false, and stays completed.
    #[test]
    fn finalize_twice_returns_true_then_false(qty in 1i64..5) {
        let mut products = catalog(&[1000, 2000, 3000]);
        let mut sale = Sale::new(SaleId::new(1), CustomerId::new(1)).unwrap();
        sale.add_line(products.product_mut(product_id(0)).unwrap(), qty).unwrap();

        prop_assert_eq!(sale.finalize(), Ok(true));
        prop_assert_eq!(sale.finalize(), Ok(false));
        prop_assert_eq!(sale.status(), SaleStatus::Completed);
    }

    /// Property: tax is the half-up rounded product of subtotal and rate.
    #[test]
    fn tax_rounds_half_up(cents in 0i64..1_000_000_000, bps in 0u32..=10_000) {
        let tax = Money::from_cents(cents).calculate_tax(TaxRate::from_bps(bps)).cents();
        let exact = cents as i128 * bps as i128;
        let floor = (exact / 10000) as i64;
        let remainder = exact % 10000;

        let expected = if remainder >= 5000 { floor + 1 } else { floor };
        prop_assert_eq!(tax, expected);
    }
}
