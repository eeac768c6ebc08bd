//! Cart lines and totals
//!
//! A [`CartLine`] carries two views of the same purchase: the base
//! `quantity` / `unit_price` / `line_total`, and the promotional
//! `promo_*` equivalents. Both totals are always `round2(price * quantity)`
//! of their own view.

use pizzeria_catalog::{line_total, round2, Money, PizzaSize, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product's presence in a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product identifier (unique per cart)
    pub product_id: ProductId,
    /// Product name at time of adding
    pub name: String,
    /// Product description at time of adding
    #[serde(default)]
    pub description: String,
    /// Product image at time of adding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Pizza size
    pub size: PizzaSize,
    /// Purchased units before promotion
    pub quantity: u32,
    /// Catalog price at time of adding
    pub unit_price: Money,
    /// `round2(unit_price * quantity)`
    pub line_total: Money,
    /// Units charged after promotion
    pub promo_quantity: u32,
    /// Unit price after promotion
    pub promo_unit_price: Money,
    /// `round2(promo_unit_price * promo_quantity)`
    pub promo_line_total: Money,
}

impl CartLine {
    /// New line for `product` with no promotion applied
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        let total = line_total(product.price, quantity);
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            size: product.size,
            quantity,
            unit_price: product.price,
            line_total: total,
            promo_quantity: quantity,
            promo_unit_price: product.price,
            promo_line_total: total,
        }
    }

    /// Change the base quantity and recompute the base total
    ///
    /// Promotional fields are left for the next evaluation.
    #[inline]
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.line_total = line_total(self.unit_price, quantity);
    }

    /// Make the promotional view equal the base view
    #[inline]
    pub fn reset_promotion(&mut self) {
        self.promo_quantity = self.quantity;
        self.promo_unit_price = self.unit_price;
        self.promo_line_total = self.line_total;
    }

    /// Apply a buy-`buy`-pay-`deal` promotion
    ///
    /// Only applies when `quantity >= buy`. Exact multiples above one set
    /// charge `quantity / buy + deal`; anything else charges
    /// `quantity % buy + deal`. Price is untouched. Returns whether the deal
    /// applied.
    pub fn apply_deal(&mut self, buy: u32, deal: u32) -> bool {
        if buy == 0 || self.quantity < buy {
            return false;
        }

        self.promo_quantity = if self.quantity == buy {
            deal
        } else if self.quantity % buy == 0 {
            self.quantity / buy + deal
        } else {
            self.quantity % buy + deal
        };
        self.promo_line_total = line_total(self.promo_unit_price, self.promo_quantity);
        true
    }

    /// Replace the promotional unit price
    pub fn apply_discount(&mut self, price: Money) {
        self.promo_unit_price = price;
        self.promo_line_total = line_total(self.promo_unit_price, self.promo_quantity);
    }

    /// Check if the promotional view differs from the base view
    #[inline]
    #[must_use]
    pub fn has_promotion(&self) -> bool {
        self.promo_quantity != self.quantity || self.promo_unit_price != self.unit_price
    }
}

/// Cart totals, base and promotional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Sum of base quantities
    pub total_item_count: u64,
    /// Sum of base line totals
    pub grand_total: Money,
    /// Sum of promotional quantities
    pub promo_item_count: u64,
    /// Sum of promotional line totals
    pub promo_grand_total: Money,
    /// Voucher in effect (empty when none)
    pub voucher_code: String,
}

impl CartSummary {
    /// Summarise `lines` under `voucher_code`
    #[must_use]
    pub fn from_lines(lines: &[CartLine], voucher_code: &str) -> Self {
        Self {
            total_item_count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
            grand_total: round2(lines.iter().map(|l| l.line_total).sum::<Decimal>()),
            promo_item_count: lines.iter().map(|l| u64::from(l.promo_quantity)).sum(),
            promo_grand_total: round2(lines.iter().map(|l| l.promo_line_total).sum::<Decimal>()),
            voucher_code: voucher_code.to_string(),
        }
    }

    /// Amount saved by promotions
    #[inline]
    #[must_use]
    pub fn savings(&self) -> Money {
        self.grand_total - self.promo_grand_total
    }
}
