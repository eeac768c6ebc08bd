//! Sample voucher rules
//!
//! The three company vouchers the storefront ships with:
//! - `Microsoft`: 3 small pizzas for the price of 2
//! - `Facebook`: 5 medium pizzas for the price of 4
//! - `Amazon`: large pizzas at 19.99

use crate::condition::{Condition, Operator};
use crate::event::PromotionEvent;
use crate::facts::names;
use crate::rule::Rule;
use pizzeria_catalog::{Currency, PizzaSize};
use rust_decimal::Decimal;

fn voucher_for(voucher: &str, size: PizzaSize, min_quantity: u32) -> Condition {
    Condition::all(vec![
        Condition::fact(names::VOUCHER_CODE, Operator::Equal, voucher),
        Condition::fact(names::SIZE, Operator::Equal, size),
        Condition::fact(names::QUANTITY, Operator::GreaterThanInclusive, min_quantity),
    ])
}

/// The built-in voucher rules, in evaluation order
#[must_use]
pub fn sample_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "microsoft",
            voucher_for("Microsoft", PizzaSize::Small, 3),
            PromotionEvent::deal(PizzaSize::Small, 3, 2),
        ),
        Rule::new(
            "facebook",
            voucher_for("Facebook", PizzaSize::Medium, 5),
            PromotionEvent::deal(PizzaSize::Medium, 5, 4),
        ),
        Rule::new(
            "amazon",
            voucher_for("Amazon", PizzaSize::Large, 1),
            PromotionEvent::Discount {
                size: PizzaSize::Large,
                price: Decimal::new(1999, 2),
                currency: Some(Currency::Aud),
            },
        ),
    ]
}
