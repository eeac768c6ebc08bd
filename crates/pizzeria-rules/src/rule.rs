//! Promotion rules

use crate::condition::Condition;
use crate::error::{EvaluationError, RuleError};
use crate::event::PromotionEvent;
use crate::facts::Facts;
use serde::{Deserialize, Serialize};

/// A named condition → event rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique name within a registry
    pub name: String,
    /// Root condition
    pub conditions: Condition,
    /// Event emitted on match
    pub event: PromotionEvent,
}

impl Rule {
    /// Create rule
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, conditions: Condition, event: PromotionEvent) -> Self {
        Self {
            name: name.into(),
            conditions,
            event,
        }
    }

    /// Parse from the JSON rule format
    ///
    /// # Errors
    /// [`RuleError::Malformed`] if the JSON does not describe a rule.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RuleError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Check name, condition tree and event parameters
    ///
    /// # Errors
    /// The first problem found.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::EmptyName);
        }
        self.conditions
            .validate_top_level()
            .map_err(|reason| RuleError::invalid_condition(&self.name, reason))?;
        self.event
            .validate()
            .map_err(|reason| RuleError::invalid_event(&self.name, reason))
    }

    /// Evaluate the conditions against facts
    ///
    /// # Errors
    /// Matching errors, tagged with this rule's name.
    pub fn matches(&self, facts: &Facts) -> Result<bool, EvaluationError> {
        self.conditions
            .evaluate(facts)
            .map_err(|e| e.in_rule(&self.name))
    }
}
