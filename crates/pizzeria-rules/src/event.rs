//! Promotion events
//!
//! What a rule yields when its conditions hold. A closed set: callers match
//! on the variant instead of digging through a parameter map.

use pizzeria_catalog::{Currency, Money, PizzaSize};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Event emitted by a matching rule
///
/// JSON form: `{"type": "DEAL", "params": {"size": "S", "buy": 3, "deal": 2}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "UPPERCASE")]
pub enum PromotionEvent {
    /// Buy `buy` units of `size`, pay for `deal`
    Deal {
        /// Size the deal applies to
        size: PizzaSize,
        /// Units that trigger the deal
        buy: u32,
        /// Units charged once triggered
        deal: u32,
    },

    /// Flat replacement unit price for `size`
    Discount {
        /// Size the discount applies to
        size: PizzaSize,
        /// Promotional unit price
        price: Money,
        /// Currency of `price`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        currency: Option<Currency>,
    },
}

impl PromotionEvent {
    /// Deal event
    #[inline]
    #[must_use]
    pub fn deal(size: PizzaSize, buy: u32, deal: u32) -> Self {
        Self::Deal { size, buy, deal }
    }

    /// Discount event
    #[inline]
    #[must_use]
    pub fn discount(size: PizzaSize, price: Money) -> Self {
        Self::Discount {
            size,
            price,
            currency: None,
        }
    }

    /// Size the event targets
    #[inline]
    #[must_use]
    pub fn size(&self) -> PizzaSize {
        match self {
            Self::Deal { size, .. } | Self::Discount { size, .. } => *size,
        }
    }

    /// Wire type name
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Deal { .. } => "DEAL",
            Self::Discount { .. } => "DISCOUNT",
        }
    }

    /// Check parameters are in range
    ///
    /// # Errors
    /// Reason text when `buy` is zero or `price` is negative.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Deal { buy: 0, .. } => Err("deal 'buy' must be at least 1".to_string()),
            Self::Discount { price, .. } if *price < Decimal::ZERO => {
                Err(format!("discount price {price} is negative"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deal_json_shape() {
        let event: PromotionEvent = serde_json::from_str(
            r#"{"type": "DEAL", "params": {"size": "S", "buy": 3, "deal": 2}}"#,
        )
        .unwrap();
        assert_eq!(event, PromotionEvent::deal(PizzaSize::Small, 3, 2));
        assert_eq!(event.kind(), "DEAL");
    }

    #[test]
    fn discount_accepts_numeric_price() {
        let event: PromotionEvent = serde_json::from_str(
            r#"{"type": "DISCOUNT", "params": {"size": "L", "price": 19.99, "currency": "AUD"}}"#,
        )
        .unwrap();
        match event {
            PromotionEvent::Discount {
                size,
                price,
                currency,
            } => {
                assert_eq!(size, PizzaSize::Large);
                assert_eq!(price, dec!(19.99));
                assert_eq!(currency, Some(Currency::Aud));
            }
            PromotionEvent::Deal { .. } => panic!("expected discount"),
        }
    }

    #[test]
    fn unknown_type_rejected() {
        let parsed = serde_json::from_str::<PromotionEvent>(
            r#"{"type": "FREEBIE", "params": {"size": "S"}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn validate_ranges() {
        assert!(PromotionEvent::deal(PizzaSize::Small, 0, 2).validate().is_err());
        assert!(PromotionEvent::deal(PizzaSize::Small, 3, 0).validate().is_ok());
        assert!(PromotionEvent::discount(PizzaSize::Large, dec!(-1)).validate().is_err());
        assert!(PromotionEvent::discount(PizzaSize::Large, dec!(0)).validate().is_ok());
    }
}
