//! Pizzeria promotion rules
//!
//! A small rules matcher specialised for cart promotions.
//!
//! # Core Concepts
//!
//! - [`Facts`]: Named values a rule set is run against
//! - [`Condition`]: `all` / `any` / `not` tree of [`Comparison`]s
//! - [`PromotionEvent`]: Typed outcome (`DEAL` or `DISCOUNT`)
//! - [`Rule`]: Name + conditions + event, validated on registration
//! - [`RuleRegistry`]: Shared, lock-protected rule set
//!
//! # Example
//!
//! ```rust
//! use pizzeria_catalog::PizzaSize;
//! use pizzeria_rules::{Facts, PromotionEvent, RuleRegistry};
//!
//! let registry = RuleRegistry::with_samples().unwrap();
//! let matched = registry.run(&Facts::for_line("Microsoft", PizzaSize::Small, 3)).unwrap();
//!
//! assert_eq!(matched[0].event, PromotionEvent::deal(PizzaSize::Small, 3, 2));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod condition;
mod error;
mod event;
pub mod facts;
mod registry;
mod rule;
mod samples;

// Re-exports
pub use condition::{Comparison, Condition, Operator};
pub use error::{EvaluationError, RuleError};
pub use event::PromotionEvent;
pub use facts::{Facts, Value};
pub use registry::{RuleMatch, RuleRegistry};
pub use rule::Rule;
pub use samples::sample_rules;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
