//! Tests for the filter combinators.
//!
//! `and` short-circuits and holds for no predicates; `or` evaluates every
//! predicate and has no answer for no predicates.

use identity_collection::{Collection, filter};
use rstest::rstest;
use std::cell::{Cell, RefCell};

// =============================================================================
// Short-circuit behavior
// =============================================================================

#[rstest]
fn test_and_skips_predicates_after_false() {
    let side_effect = Cell::new(false);
    let never = |_: &i32| false;
    let observed = |_: &i32| {
        side_effect.set(true);
        true
    };
    let predicates: [&dyn Fn(&i32) -> bool; 2] = [&never, &observed];

    assert!(!filter::and(predicates, &1));
    assert!(!side_effect.get());
}

#[rstest]
fn test_or_runs_every_predicate() {
    let side_effect = Cell::new(false);
    let never = |_: &i32| false;
    let observed = |_: &i32| {
        side_effect.set(true);
        true
    };
    let predicates: [&dyn Fn(&i32) -> bool; 2] = [&never, &observed];

    assert_eq!(filter::or(predicates, &1), Some(true));
    assert!(side_effect.get());
}

#[rstest]
fn test_or_runs_every_predicate_after_an_early_match() {
    let side_effect = Cell::new(false);
    let always = |_: &i32| true;
    let observed = |_: &i32| {
        side_effect.set(true);
        false
    };
    let predicates: [&dyn Fn(&i32) -> bool; 2] = [&always, &observed];

    assert_eq!(filter::or(predicates, &1), Some(true));
    assert!(side_effect.get());
}

#[rstest]
fn test_predicates_run_in_order() {
    let calls = RefCell::new(Vec::new());
    let first = |_: &i32| {
        calls.borrow_mut().push("first");
        true
    };
    let second = |_: &i32| {
        calls.borrow_mut().push("second");
        true
    };
    let predicates: [&dyn Fn(&i32) -> bool; 2] = [&first, &second];

    filter::and(predicates, &0);
    filter::or(predicates, &0);

    assert_eq!(*calls.borrow(), vec!["first", "second", "first", "second"]);
}

// =============================================================================
// Empty predicate lists
// =============================================================================

#[rstest]
fn test_and_of_nothing_is_true() {
    let predicates: Vec<Box<dyn Fn(&str) -> bool>> = Vec::new();
    assert!(filter::and(&predicates, "anything"));
}

#[rstest]
fn test_or_of_nothing_is_none() {
    let predicates: Vec<Box<dyn Fn(&str) -> bool>> = Vec::new();
    assert_eq!(filter::or(&predicates, "anything"), None);
}

// =============================================================================
// Use within collection queries
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
struct Product {
    sku: &'static str,
    price: u32,
    in_stock: bool,
}

fn catalog() -> Collection<Product, &'static str> {
    let mut catalog = Collection::with_identity(|product: &Product| product.sku);
    catalog.add_all([
        Product { sku: "p1", price: 5, in_stock: true },
        Product { sku: "p2", price: 50, in_stock: true },
        Product { sku: "p3", price: 8, in_stock: false },
        Product { sku: "p4", price: 500, in_stock: false },
    ]);
    catalog
}

#[rstest]
fn test_and_inside_find() {
    let cheap = |product: &Product| product.price < 10;
    let available = |product: &Product| product.in_stock;
    let predicates: [&dyn Fn(&Product) -> bool; 2] = [&cheap, &available];

    let found = catalog().find(|product| filter::and(predicates, product));

    let skus: Vec<&str> = found.iter().map(|product| product.sku).collect();
    assert_eq!(skus, vec!["p1"]);
}

#[rstest]
fn test_or_inside_find() {
    let cheap = |product: &Product| product.price < 10;
    let premium = |product: &Product| product.price > 100;
    let predicates: [&dyn Fn(&Product) -> bool; 2] = [&cheap, &premium];

    let found = catalog().find(|product| filter::or(predicates, product).unwrap_or(false));

    let skus: Vec<&str> = found.iter().map(|product| product.sku).collect();
    assert_eq!(skus, vec!["p1", "p3", "p4"]);
}

#[rstest]
fn test_combinators_inside_has_matching() {
    let cheap = |product: &Product| product.price < 10;
    let premium = |product: &Product| product.price > 100;
    let predicates: [&dyn Fn(&Product) -> bool; 2] = [&cheap, &premium];

    assert!(!catalog().has_matching(|product| filter::and(predicates, product)));
}

#[rstest]
fn test_shared_arguments_as_tuple() {
    let budget_allows = |(product, budget): &(&Product, u32)| product.price <= *budget;
    let available = |(product, _): &(&Product, u32)| product.in_stock;
    let predicates: [&dyn Fn(&(&Product, u32)) -> bool; 2] = [&budget_allows, &available];

    let catalog = catalog();
    let affordable = catalog.find(|product| filter::and(predicates, &(product, 60)));

    assert_eq!(affordable.len(), 2);
}
