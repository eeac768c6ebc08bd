//! Cart operations
//!
//! [`CartService`] is the only way the cart in a [`Session`] changes. Every
//! mutation re-runs promotions under the session's voucher and writes the
//! cart back before returning.

use crate::error::CartError;
use crate::line::{CartLine, CartSummary};
use crate::promotion::PromotionEvaluator;
use crate::session::Session;
use pizzeria_catalog::{ProductId, ProductRepository};
use pizzeria_rules::RuleRegistry;

/// Cart operations over a catalog and a rule registry
pub struct CartService<'a, R: ProductRepository + ?Sized> {
    catalog: &'a R,
    evaluator: PromotionEvaluator<'a>,
}

impl<'a, R: ProductRepository + ?Sized> CartService<'a, R> {
    /// Create service
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a R, registry: &'a RuleRegistry) -> Self {
        Self {
            catalog,
            evaluator: PromotionEvaluator::new(registry),
        }
    }

    /// Change a product's quantity by `delta`
    ///
    /// A product not yet in the cart gets a new line. Quantities never go
    /// below zero and a line at zero stays in the cart.
    ///
    /// # Errors
    /// [`CartError::ProductNotFound`] if the catalog has no such product; the
    /// session is untouched.
    pub fn add_item(
        &self,
        session: &mut Session,
        product_id: &ProductId,
        delta: i32,
    ) -> Result<CartLine, CartError> {
        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or_else(|| CartError::ProductNotFound(product_id.clone()))?;

        let mut lines = session.cart();
        let index = match lines.iter().position(|l| &l.product_id == product_id) {
            Some(index) => {
                let line = &mut lines[index];
                line.set_quantity(clamp_quantity(i64::from(line.quantity) + i64::from(delta)));
                index
            }
            None => {
                lines.push(CartLine::from_product(&product, clamp_quantity(i64::from(delta))));
                lines.len() - 1
            }
        };

        self.commit(session, &mut lines)?;

        let line = lines.swap_remove(index);
        tracing::info!(
            product_id = %product_id,
            delta,
            quantity = line.quantity,
            "cart item updated"
        );
        Ok(line)
    }

    /// Delete a product's line from the cart
    ///
    /// Returns whether a line was removed; a known product without a line
    /// leaves the cart as it is.
    ///
    /// # Errors
    /// [`CartError::ProductNotFound`] if the catalog has no such product.
    pub fn remove_item(&self, session: &mut Session, product_id: &ProductId) -> Result<bool, CartError> {
        if self.catalog.find_by_id(product_id).is_none() {
            return Err(CartError::ProductNotFound(product_id.clone()));
        }

        let mut lines = session.cart();
        let before = lines.len();
        lines.retain(|l| &l.product_id != product_id);
        let removed = lines.len() != before;

        self.commit(session, &mut lines)?;
        tracing::info!(product_id = %product_id, removed, "cart item removed");
        Ok(removed)
    }

    /// Store `code` as the session voucher and re-price the cart
    ///
    /// Any string is accepted; codes that no rule mentions just match nothing.
    ///
    /// # Errors
    /// [`CartError::Session`] if the cart cannot be written back.
    pub fn apply_voucher(&self, session: &mut Session, code: &str) -> Result<(), CartError> {
        session.set_voucher(code);
        let mut lines = session.cart();
        self.commit(session, &mut lines)?;
        tracing::info!(voucher = %code, lines = lines.len(), "voucher applied");
        Ok(())
    }

    /// Current cart lines
    #[inline]
    #[must_use]
    pub fn lines(&self, session: &Session) -> Vec<CartLine> {
        session.cart()
    }

    /// Current voucher code
    #[inline]
    #[must_use]
    pub fn voucher(&self, session: &Session) -> String {
        session.voucher()
    }

    /// Sum of base quantities
    #[must_use]
    pub fn item_count(&self, session: &Session) -> u64 {
        session.cart().iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Cart totals
    #[must_use]
    pub fn summary(&self, session: &Session) -> CartSummary {
        CartSummary::from_lines(&session.cart(), &session.voucher())
    }

    fn commit(&self, session: &mut Session, lines: &mut [CartLine]) -> Result<(), CartError> {
        let voucher = session.voucher();
        self.evaluator.evaluate(&voucher, lines);
        session.set_cart(lines)
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use pizzeria_catalog::{InMemoryCatalog, PizzaSize, Product};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    mock! {
        Catalog {}

        impl ProductRepository for Catalog {
            fn find_by_id(&self, id: &ProductId) -> Option<Product>;
            fn find_all(&self) -> Vec<Product>;
        }
    }

    fn small_id() -> ProductId {
        ProductId::new("6db94ec1-e0be-4958-af76-22353467c22f")
    }

    fn large_id() -> ProductId {
        ProductId::new("2fc55532-82cd-461d-aed5-2a7b941f40ab")
    }

    #[test]
    fn unknown_product_leaves_session_untouched() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_find_by_id()
            .with(eq(ProductId::new("ghost")))
            .times(2)
            .returning(|_| None);
        let registry = RuleRegistry::with_samples().unwrap();
        let service = CartService::new(&catalog, &registry);

        let mut session = Session::new();
        let err = service
            .add_item(&mut session, &ProductId::new("ghost"), 1)
            .unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(_)));

        let err = service
            .remove_item(&mut session, &ProductId::new("ghost"))
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(!session.is_dirty());
    }

    #[test]
    fn add_uses_catalog_product() {
        let mut catalog = MockCatalog::new();
        catalog.expect_find_by_id().returning(|id| {
            Some(Product::new(id.as_str(), "Test Pizza", PizzaSize::Medium, dec!(10)))
        });
        let registry = RuleRegistry::new();
        let service = CartService::new(&catalog, &registry);

        let mut session = Session::new();
        let line = service.add_item(&mut session, &ProductId::new("t"), 2).unwrap();

        assert_eq!(line.name, "Test Pizza");
        assert_eq!(line.line_total, dec!(20));
        assert_eq!(service.item_count(&session), 2);
    }

    #[test]
    fn quantity_never_negative() {
        let catalog = InMemoryCatalog::with_samples();
        let registry = RuleRegistry::new();
        let service = CartService::new(&catalog, &registry);
        let mut session = Session::new();

        let line = service.add_item(&mut session, &small_id(), -1).unwrap();
        assert_eq!(line.quantity, 0);

        service.add_item(&mut session, &small_id(), 1).unwrap();
        let line = service.add_item(&mut session, &small_id(), -5).unwrap();
        assert_eq!(line.quantity, 0);
        assert_eq!(line.line_total, dec!(0));
        assert_eq!(service.lines(&session).len(), 1);
    }

    #[test]
    fn remove_without_line_is_noop() {
        let catalog = InMemoryCatalog::with_samples();
        let registry = RuleRegistry::new();
        let service = CartService::new(&catalog, &registry);
        let mut session = Session::new();
        service.add_item(&mut session, &small_id(), 1).unwrap();

        assert!(!service.remove_item(&mut session, &large_id()).unwrap());
        assert_eq!(service.lines(&session).len(), 1);
    }

    #[test]
    fn voucher_applied_before_items_takes_effect() {
        let catalog = InMemoryCatalog::with_samples();
        let registry = RuleRegistry::with_samples().unwrap();
        let service = CartService::new(&catalog, &registry);
        let mut session = Session::new();

        service.apply_voucher(&mut session, "Amazon").unwrap();
        let line = service.add_item(&mut session, &large_id(), 1).unwrap();

        assert_eq!(line.promo_unit_price, dec!(19.99));
        assert_eq!(service.voucher(&session), "Amazon");
        assert_eq!(service.summary(&session).promo_grand_total, dec!(19.99));
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_quantity(-3), 0);
        assert_eq!(clamp_quantity(7), 7);
        assert_eq!(clamp_quantity(i64::MAX), u32::MAX);
    }
}
