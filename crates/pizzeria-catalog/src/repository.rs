//! Product repository
//!
//! [`ProductRepository`] is the lookup seam the cart depends on. The
//! in-memory implementation filters a fixed list the way a `findMany` query
//! with an `id IN (...)` clause would.

use crate::product::{Currency, Product, ProductId};
use crate::size::PizzaSize;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

/// Read access to products
pub trait ProductRepository: Send + Sync {
    /// Look up a single product
    fn find_by_id(&self, id: &ProductId) -> Option<Product>;

    /// All products, in menu order
    fn find_all(&self) -> Vec<Product>;

    /// Products whose id is in `ids`, in menu order
    fn find_many(&self, ids: &[ProductId]) -> Vec<Product> {
        self.find_all()
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect()
    }
}

static SAMPLE_PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| {
    vec![
        Product::new(
            "6db94ec1-e0be-4958-af76-22353467c22f",
            "Small Pizza",
            PizzaSize::Small,
            Decimal::new(1199, 2),
        )
        .with_description("10'' Pizza for one person")
        .with_currency(Currency::Aud)
        .with_image("/products/pizza/1.jpg")
        .with_category("PIZZA"),
        Product::new(
            "5e6ca1f4-a7b8-400e-8958-c5cbb38d3bb0",
            "Medium Pizza",
            PizzaSize::Medium,
            Decimal::new(1599, 2),
        )
        .with_description("12'' Pizza for two persons")
        .with_currency(Currency::Aud)
        .with_image("/products/pizza/1.jpg")
        .with_category("PIZZA"),
        Product::new(
            "2fc55532-82cd-461d-aed5-2a7b941f40ab",
            "Large Pizza",
            PizzaSize::Large,
            Decimal::new(2199, 2),
        )
        .with_description("15'' Pizza for four persons")
        .with_currency(Currency::Aud)
        .with_image("/products/pizza/1.jpg")
        .with_category("PIZZA"),
    ]
});

/// The built-in menu (small, medium, large)
#[must_use]
pub fn sample_products() -> Vec<Product> {
    SAMPLE_PRODUCTS.clone()
}

/// Catalog backed by a fixed list
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Create catalog over the given products
    #[inline]
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Create catalog with the built-in menu
    #[inline]
    #[must_use]
    pub fn with_samples() -> Self {
        Self::new(sample_products())
    }

    /// Number of products
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductRepository for InMemoryCatalog {
    fn find_by_id(&self, id: &ProductId) -> Option<Product> {
        tracing::debug!(product_id = %id, "product#findById");
        self.products.iter().find(|p| &p.id == id).cloned()
    }

    fn find_all(&self) -> Vec<Product> {
        tracing::debug!("product#findAll");
        self.products.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_have_three_products() {
        let catalog = InMemoryCatalog::with_samples();
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn find_by_id_known() {
        let catalog = InMemoryCatalog::with_samples();
        let first = sample_products().remove(0);
        let found = catalog.find_by_id(&first.id).unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.size, PizzaSize::Small);
    }

    #[test]
    fn find_by_id_unknown() {
        let catalog = InMemoryCatalog::with_samples();
        assert!(catalog.find_by_id(&ProductId::new("nope")).is_none());
    }

    #[test]
    fn find_many_filters_and_keeps_menu_order() {
        let catalog = InMemoryCatalog::with_samples();
        let all = catalog.find_all();
        let ids = vec![all[2].id.clone(), ProductId::new("missing"), all[0].id.clone()];

        let found = catalog.find_many(&ids);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].size, PizzaSize::Small);
        assert_eq!(found[1].size, PizzaSize::Large);
    }

    #[test]
    fn empty_catalog() {
        let catalog = InMemoryCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.find_all().is_empty());
    }
}
