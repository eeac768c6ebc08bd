//! Rule registry
//!
//! Provides [`RuleRegistry`], the named rule set shared by every request.
//! Rules are kept in registration order; re-adding a name removes the old
//! rule first, so the replacement moves to the end.
//!
//! Reads (`run`, `get`, `names`) take a shared lock, writes take an exclusive
//! one, so concurrent rule edits never lose updates.

use crate::error::{EvaluationError, RuleError};
use crate::event::PromotionEvent;
use crate::facts::Facts;
use crate::rule::Rule;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;

/// A rule whose conditions held
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    /// Rule name
    pub rule: String,
    /// Emitted event
    pub event: PromotionEvent,
}

/// Named promotion rules
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: RwLock<IndexMap<String, Rule>>,
}

impl RuleRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(IndexMap::new()),
        }
    }

    /// Create registry holding `rules`, in order
    ///
    /// # Errors
    /// The first rule that fails validation.
    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        let registry = Self::new();
        for rule in rules {
            registry.add_rule(rule)?;
        }
        Ok(registry)
    }

    /// Create registry with the sample voucher rules
    ///
    /// # Errors
    /// Only if a sample rule fails validation.
    pub fn with_samples() -> Result<Self, RuleError> {
        Self::with_rules(crate::samples::sample_rules())
    }

    /// Add or replace a rule
    ///
    /// Validation happens before the lock is taken; a rejected rule leaves the
    /// registry untouched (including any existing rule of the same name).
    ///
    /// # Errors
    /// [`RuleError`] describing the malformed part.
    pub fn add_rule(&self, rule: Rule) -> Result<(), RuleError> {
        if let Err(e) = rule.validate() {
            tracing::warn!(rule = %rule.name, error = %e, "addRule rejected");
            return Err(e);
        }

        let mut rules = self.rules.write();
        let replaced = rules.shift_remove(&rule.name).is_some();
        tracing::info!(rule = %rule.name, event = rule.event.kind(), replaced, "rule added");
        rules.insert(rule.name.clone(), rule);
        Ok(())
    }

    /// Parse and add a rule from its JSON form
    ///
    /// # Errors
    /// [`RuleError::Malformed`] on bad JSON, otherwise as [`Self::add_rule`].
    pub fn add_rule_json(&self, value: serde_json::Value) -> Result<(), RuleError> {
        let rule = Rule::from_json(value).map_err(|e| {
            tracing::warn!(error = %e, "addRule rejected");
            e
        })?;
        self.add_rule(rule)
    }

    /// Remove a rule by name
    ///
    /// Returns whether a rule was removed; an unknown name is not an error.
    pub fn remove_rule(&self, name: &str) -> bool {
        let removed = self.rules.write().shift_remove(name).is_some();
        if removed {
            tracing::info!(rule = %name, "rule removed");
        }
        removed
    }

    /// Check if a rule is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Copy of a rule
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rule> {
        self.rules.read().get(name).cloned()
    }

    /// Rule names in evaluation order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.rules.read().keys().cloned().collect()
    }

    /// Number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// Evaluate every rule against `facts`
    ///
    /// Rules are independent; the result lists matches in registration order
    /// and leaves precedence to the caller.
    ///
    /// # Errors
    /// The first rule that cannot be evaluated fails the whole run.
    pub fn run(&self, facts: &Facts) -> Result<Vec<RuleMatch>, EvaluationError> {
        let rules = self.rules.read();
        let mut matched = Vec::new();

        for rule in rules.values() {
            if rule.matches(facts)? {
                matched.push(RuleMatch {
                    rule: rule.name.clone(),
                    event: rule.event.clone(),
                });
            }
        }

        tracing::debug!(rules = rules.len(), matched = matched.len(), "rules run");
        Ok(matched)
    }
}
