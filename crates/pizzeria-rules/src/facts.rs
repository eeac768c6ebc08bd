//! Fact values
//!
//! Provides [`Value`], the dynamically typed payload shared by facts and
//! condition operands, and [`Facts`], the named set a rule is run against.

use pizzeria_catalog::PizzaSize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Fact names supplied by the promotion evaluator
pub mod names {
    /// Voucher code held in the session (text, empty when none)
    pub const VOUCHER_CODE: &str = "voucherCode";
    /// Cart line size (text `S`, `M` or `L`)
    pub const SIZE: &str = "size";
    /// Cart line base quantity (number)
    pub const QUANTITY: &str = "quantity";
}

/// A fact or operand value
///
/// Mirrors JSON scalars and arrays. Equality is strict: a number never equals
/// a string that spells it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// Text
    Text(String),
    /// Array of values
    List(Vec<Value>),
}

impl Value {
    /// Numeric view, if this is a number
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Array view, if this is a list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short type name for diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "array",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<PizzaSize> for Value {
    fn from(size: PizzaSize) -> Self {
        Self::Text(size.code().to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Named facts a rule set is run against
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facts(BTreeMap<String, Value>);

impl Facts {
    /// Create empty fact set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Facts for one cart line
    #[must_use]
    pub fn for_line(voucher_code: &str, size: PizzaSize, quantity: u32) -> Self {
        Self::new()
            .with(names::VOUCHER_CODE, voucher_code)
            .with(names::SIZE, size)
            .with(names::QUANTITY, quantity)
    }

    /// With a fact
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a fact, replacing any previous value
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a fact
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of facts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no facts are set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_facts() {
        let facts = Facts::for_line("Microsoft", PizzaSize::Small, 3);
        assert_eq!(facts.len(), 3);
        assert_eq!(facts.get(names::VOUCHER_CODE), Some(&Value::from("Microsoft")));
        assert_eq!(facts.get(names::SIZE), Some(&Value::from("S")));
        assert_eq!(facts.get(names::QUANTITY), Some(&Value::Number(3.0)));
    }

    #[test]
    fn value_json_shapes() {
        let v: Value = serde_json::from_str(r#"["S", 2, true]"#).unwrap();
        assert_eq!(
            v,
            Value::List(vec![Value::from("S"), Value::Number(2.0), Value::Bool(true)])
        );
        assert_eq!(v.type_name(), "array");
        assert_eq!(v.to_string(), r#"["S", 2, true]"#);
    }

    #[test]
    fn facts_deserialize_from_object() {
        let facts: Facts =
            serde_json::from_str(r#"{"voucherCode": "Amazon", "size": "L", "quantity": 1}"#)
                .unwrap();
        assert_eq!(facts, Facts::for_line("Amazon", PizzaSize::Large, 1));
    }
}
