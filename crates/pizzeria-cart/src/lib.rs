//! Pizzeria cart
//!
//! Session-scoped shopping cart whose lines are re-priced by the promotion
//! rules on every change.
//!
//! # Core Concepts
//!
//! - [`Session`]: Key-value state holding the cart and the voucher code
//! - [`CartLine`]: Base and promotional view of one product
//! - [`PromotionEvaluator`]: Runs the [`RuleRegistry`](pizzeria_rules::RuleRegistry) per line
//! - [`CartService`]: Add, remove and voucher operations
//!
//! # Example
//!
//! ```rust
//! use pizzeria_cart::{CartService, Session};
//! use pizzeria_catalog::{InMemoryCatalog, PizzaSize, ProductRepository};
//! use pizzeria_rules::RuleRegistry;
//!
//! let catalog = InMemoryCatalog::with_samples();
//! let registry = RuleRegistry::with_samples().unwrap();
//! let cart = CartService::new(&catalog, &registry);
//!
//! let small = catalog
//!     .find_all()
//!     .into_iter()
//!     .find(|p| p.size == PizzaSize::Small)
//!     .unwrap();
//!
//! let mut session = Session::new();
//! cart.apply_voucher(&mut session, "Microsoft").unwrap();
//! let line = cart.add_item(&mut session, &small.id, 3).unwrap();
//!
//! assert_eq!(line.promo_quantity, 2);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod line;
mod promotion;
mod service;
mod session;

// Re-exports
pub use error::CartError;
pub use line::{CartLine, CartSummary};
pub use promotion::{EvaluationReport, PromotionEvaluator};
pub use service::CartService;
pub use session::{Session, CART_SESSION_KEY, VOUCHER_SESSION_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
