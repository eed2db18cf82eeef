//! Integration tests for cart recalculation

use rusty_money::{
    Money,
    iso::{INR, USD},
};
use testresult::TestResult;

use shopsmart::{
    cart::{Cart, CartItem, CartMutation},
    products::{ProductId, ProductRef},
};

fn line(id: &str, price: &str, quantity: i64, selected: bool) -> CartItem {
    CartItem::new(ProductRef::new(id, format!("Product {id}"), price), quantity).with_selected(selected)
}

#[test]
fn total_excludes_unselected_lines() -> TestResult {
    let cart = Cart::with_items(
        [line("1", "$10.00", 2, true), line("2", "$5.00", 1, false)],
        USD,
    )?;

    assert_eq!(cart.total(), Money::from_minor(2000, USD));
    assert_eq!(cart.selected_count(), 1);

    Ok(())
}

#[test]
fn rupee_prices_with_separators_are_summed() -> TestResult {
    let cart = Cart::with_items(
        [line("1", "₹1,234.56", 1, true), line("2", "₹100", 3, true)],
        INR,
    )?;

    assert_eq!(cart.total(), Money::from_minor(153_456, INR));

    Ok(())
}

#[test]
fn garbage_prices_count_as_zero() -> TestResult {
    let cart = Cart::with_items(
        [line("1", "", 4, true), line("2", "n/a", 2, true), line("3", "$1.50", 2, true)],
        USD,
    )?;

    assert_eq!(cart.total(), Money::from_minor(300, USD));
    assert_eq!(cart.selected_count(), 3);

    Ok(())
}

#[test]
fn every_mutation_recomputes_totals() -> TestResult {
    let mut cart = Cart::with_items(
        [line("1", "$10.00", 1, true), line("2", "$20.00", 1, true)],
        USD,
    )?;

    cart.apply(&CartMutation::AdjustQuantity {
        product: ProductId::new("1"),
        delta: 2,
    })?;
    assert_eq!(cart.total(), Money::from_minor(5000, USD));

    cart.apply(&CartMutation::ToggleSelection(ProductId::new("2")))?;
    assert_eq!(cart.total(), Money::from_minor(3000, USD));
    assert_eq!(cart.selected_count(), 1);

    cart.apply(&CartMutation::Remove(ProductId::new("1")))?;
    assert_eq!(cart.total(), Money::from_minor(0, USD));
    assert_eq!(cart.selected_count(), 0);
    assert_eq!(cart.len(), 1);

    cart.apply(&CartMutation::Clear)?;
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn decrementing_never_goes_below_one() -> TestResult {
    let mut cart = Cart::with_items([line("1", "$10.00", 2, true)], USD)?;
    let product = ProductId::new("1");

    for _ in 0..5 {
        cart.apply(&CartMutation::AdjustQuantity {
            product: product.clone(),
            delta: -1,
        })?;
    }

    assert_eq!(cart.item(&product).map(CartItem::quantity), Some(1));
    assert_eq!(cart.total(), Money::from_minor(1000, USD));

    Ok(())
}

#[test]
fn removing_removes_exactly_one_line() -> TestResult {
    let mut cart = Cart::with_items(
        [
            line("1", "$1.00", 1, true),
            line("2", "$2.00", 1, true),
            line("3", "$3.00", 1, true),
        ],
        USD,
    )?;

    cart.apply(&CartMutation::Remove(ProductId::new("2")))?;

    let remaining: Vec<&str> = cart.items().iter().map(|item| item.product_id().as_str()).collect();

    assert_eq!(remaining, vec!["1", "3"]);
    assert_eq!(cart.total(), Money::from_minor(400, USD));

    Ok(())
}
