//! Testing utilities for the pizzeria workspace
//!
//! Shared fixtures: the sample menu, a seeded rule registry and carts with
//! items already in them.

#![allow(missing_docs)]

use pizzeria_cart::{CartService, Session};
use pizzeria_catalog::{InMemoryCatalog, PizzaSize, Product, ProductId, ProductRepository};
use pizzeria_rules::{Condition, Operator, PromotionEvent, Rule, RuleRegistry};
use rust_decimal::Decimal;

pub fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_samples()
}

pub fn sample_registry() -> RuleRegistry {
    RuleRegistry::with_samples().unwrap()
}

pub fn product_of_size(size: PizzaSize) -> Product {
    sample_catalog()
        .find_all()
        .into_iter()
        .find(|p| p.size == size)
        .unwrap()
}

pub fn product_id(size: PizzaSize) -> ProductId {
    product_of_size(size).id
}

pub fn small_id() -> ProductId {
    product_id(PizzaSize::Small)
}

pub fn medium_id() -> ProductId {
    product_id(PizzaSize::Medium)
}

pub fn large_id() -> ProductId {
    product_id(PizzaSize::Large)
}

/// Session holding `items` (size, quantity) added through the cart service
pub fn session_with_items(
    catalog: &InMemoryCatalog,
    registry: &RuleRegistry,
    voucher: &str,
    items: &[(PizzaSize, i32)],
) -> Session {
    let service = CartService::new(catalog, registry);
    let mut session = Session::new();
    if !voucher.is_empty() {
        service.apply_voucher(&mut session, voucher).unwrap();
    }
    for (size, quantity) in items {
        service
            .add_item(&mut session, &product_id(*size), *quantity)
            .unwrap();
    }
    session
}

/// A rule on the `company` fact, which the cart never supplies
pub fn undefined_fact_rule(name: &str, size: PizzaSize) -> Rule {
    Rule::new(
        name,
        Condition::all(vec![Condition::fact("company", Operator::Equal, "Amazon")]),
        PromotionEvent::discount(size, Decimal::ONE),
    )
}

/// Voucher-gated discount for `size`
pub fn voucher_discount(name: &str, voucher: &str, size: PizzaSize, price: Decimal) -> Rule {
    Rule::new(
        name,
        Condition::all(vec![
            Condition::fact("voucherCode", Operator::Equal, voucher),
            Condition::fact("size", Operator::Equal, size),
        ]),
        PromotionEvent::discount(size, price),
    )
}
