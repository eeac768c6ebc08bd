//! Condition trees
//!
//! A rule's conditions are a boolean tree: `all` / `any` / `not` nodes over
//! leaf [`Comparison`]s of a named fact against a constant. The JSON shape is
//! the one common rules engines use:
//!
//! ```json
//! { "all": [ { "fact": "quantity", "operator": "greaterThanInclusive", "value": 3 } ] }
//! ```
//!
//! Structure is checked once by [`Condition::validate_top_level`] when a rule
//! is registered; [`Condition::evaluate`] only fails on facts that are missing
//! at run time.

use crate::error::EvaluationError;
use crate::facts::{Facts, Value};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Strict equality (string or number)
    Equal,
    /// Strict inequality
    NotEqual,
    /// `fact < value`
    LessThan,
    /// `fact <= value`
    LessThanInclusive,
    /// `fact > value`
    GreaterThan,
    /// `fact >= value`
    GreaterThanInclusive,
    /// Fact is a member of the value array
    In,
    /// Fact is not a member of the value array
    NotIn,
    /// Fact array contains the value
    Contains,
    /// Fact array does not contain the value
    DoesNotContain,
}

impl Operator {
    /// Operator compares numbers
    #[inline]
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::LessThan | Self::LessThanInclusive | Self::GreaterThan | Self::GreaterThanInclusive
        )
    }

    /// Wire name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "notEqual",
            Self::LessThan => "lessThan",
            Self::LessThanInclusive => "lessThanInclusive",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanInclusive => "greaterThanInclusive",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::Contains => "contains",
            Self::DoesNotContain => "doesNotContain",
        }
    }

    /// Apply to a fact value and an operand
    ///
    /// Type mismatches (a numeric operator on text, `contains` on a scalar)
    /// are a non-match, not an error.
    #[must_use]
    pub fn apply(self, fact: &Value, operand: &Value) -> bool {
        match self {
            Self::Equal => fact == operand,
            Self::NotEqual => fact != operand,
            Self::LessThan => numeric(fact, operand, |a, b| a < b),
            Self::LessThanInclusive => numeric(fact, operand, |a, b| a <= b),
            Self::GreaterThan => numeric(fact, operand, |a, b| a > b),
            Self::GreaterThanInclusive => numeric(fact, operand, |a, b| a >= b),
            Self::In => operand.as_list().is_some_and(|items| items.contains(fact)),
            Self::NotIn => operand.as_list().is_some_and(|items| !items.contains(fact)),
            Self::Contains => fact.as_list().is_some_and(|items| items.contains(operand)),
            Self::DoesNotContain => fact.as_list().is_some_and(|items| !items.contains(operand)),
        }
    }
}

fn numeric(fact: &Value, operand: &Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (fact.as_number(), operand.as_number()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leaf condition: `fact <operator> value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Fact name
    pub fact: String,
    /// Operator
    pub operator: Operator,
    /// Constant operand
    pub value: Value,
}

impl Comparison {
    /// Create comparison
    #[must_use]
    pub fn new(fact: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            fact: fact.into(),
            operator,
            value: value.into(),
        }
    }

    /// Check operand shape against the operator
    fn validate(&self) -> Result<(), String> {
        if self.fact.trim().is_empty() {
            return Err("comparison has an empty fact name".to_string());
        }

        let ok = if self.operator.is_numeric() {
            self.value.as_number().is_some()
        } else {
            match self.operator {
                Operator::In | Operator::NotIn => self.value.as_list().is_some(),
                Operator::Contains | Operator::DoesNotContain => self.value.as_list().is_none(),
                _ => true,
            }
        };

        if ok {
            Ok(())
        } else {
            Err(format!(
                "operator '{}' on fact '{}' cannot take a {} operand",
                self.operator,
                self.fact,
                self.value.type_name()
            ))
        }
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool, EvaluationError> {
        let fact = facts
            .get(&self.fact)
            .ok_or_else(|| EvaluationError::UndefinedFact(self.fact.clone()))?;
        Ok(self.operator.apply(fact, &self.value))
    }
}

/// Boolean condition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Every child holds
    All {
        /// Children
        all: Vec<Condition>,
    },
    /// At least one child holds
    Any {
        /// Children
        any: Vec<Condition>,
    },
    /// Child does not hold
    Not {
        /// Negated child
        not: Box<Condition>,
    },
    /// Leaf comparison
    Compare(Comparison),
}

impl Condition {
    /// Conjunction
    #[inline]
    #[must_use]
    pub fn all(children: Vec<Condition>) -> Self {
        Self::All { all: children }
    }

    /// Disjunction
    #[inline]
    #[must_use]
    pub fn any(children: Vec<Condition>) -> Self {
        Self::Any { any: children }
    }

    /// Negation
    #[inline]
    #[must_use]
    pub fn not(child: Condition) -> Self {
        Self::Not {
            not: Box::new(child),
        }
    }

    /// Leaf comparison
    #[inline]
    #[must_use]
    pub fn fact(fact: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self::Compare(Comparison::new(fact, operator, value))
    }

    /// Validate a rule's root condition
    ///
    /// The root must be a boolean node; below it, every `all` / `any` must
    /// have children and every comparison must fit its operator.
    ///
    /// # Errors
    /// Returns the first problem found, as text.
    pub fn validate_top_level(&self) -> Result<(), String> {
        if matches!(self, Self::Compare(_)) {
            return Err("top-level condition must be 'all', 'any' or 'not'".to_string());
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Self::All { all: children } | Self::Any { any: children } => {
                if children.is_empty() {
                    return Err(format!("'{}' must have at least one condition", self.kind()));
                }
                children.iter().try_for_each(Self::validate)
            }
            Self::Not { not } => not.validate(),
            Self::Compare(cmp) => cmp.validate(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::All { .. } => "all",
            Self::Any { .. } => "any",
            Self::Not { .. } => "not",
            Self::Compare(_) => "comparison",
        }
    }

    /// Evaluate against facts
    ///
    /// `all` and `any` short-circuit left to right.
    ///
    /// # Errors
    /// [`EvaluationError::UndefinedFact`] if a visited comparison names a fact
    /// that is not in `facts`.
    pub fn evaluate(&self, facts: &Facts) -> Result<bool, EvaluationError> {
        match self {
            Self::All { all } => {
                for child in all {
                    if !child.evaluate(facts)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any { any } => {
                for child in any {
                    if child.evaluate(facts)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not { not } => Ok(!not.evaluate(facts)?),
            Self::Compare(cmp) => cmp.evaluate(facts),
        }
    }
}
