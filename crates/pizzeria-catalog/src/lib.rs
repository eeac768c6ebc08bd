//! Pizzeria catalog
//!
//! Products on sale and the primitive types every other crate speaks in.
//!
//! # Core Concepts
//!
//! - [`PizzaSize`]: Closed size enumeration (`S`, `M`, `L` on the wire)
//! - [`Product`]: A catalog entry with its decimal price
//! - [`ProductRepository`]: Lookup seam standing in for a database
//! - [`InMemoryCatalog`]: The built-in three-pizza menu
//! - [`money`]: Two-place half-up rounding for every monetary total
//!
//! # Example
//!
//! ```rust
//! use pizzeria_catalog::{InMemoryCatalog, PizzaSize, ProductRepository};
//!
//! let catalog = InMemoryCatalog::with_samples();
//! let small = catalog
//!     .find_all()
//!     .into_iter()
//!     .find(|p| p.size == PizzaSize::Small)
//!     .unwrap();
//!
//! assert_eq!(catalog.find_by_id(&small.id), Some(small));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod money;
mod product;
mod repository;
mod size;

// Re-exports
pub use money::{line_total, round2, Money};
pub use product::{Currency, Product, ProductId};
pub use repository::{sample_products, InMemoryCatalog, ProductRepository};
pub use size::PizzaSize;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
