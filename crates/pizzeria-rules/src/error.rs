//! Error types for the rule registry
//!
//! Two families:
//! - [`RuleError`]: a rule was rejected at registration time
//! - [`EvaluationError`]: a registered rule could not be matched against facts

/// Rule registration errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Rule has no name
    #[error("rule name must not be empty")]
    EmptyName,

    /// Condition tree is malformed
    #[error("invalid condition in rule '{rule}': {reason}")]
    InvalidCondition {
        /// Rule name
        rule: String,
        /// What is wrong with the tree
        reason: String,
    },

    /// Event payload is out of range
    #[error("invalid event in rule '{rule}': {reason}")]
    InvalidEvent {
        /// Rule name
        rule: String,
        /// What is wrong with the params
        reason: String,
    },

    /// JSON definition could not be parsed
    #[error("malformed rule definition: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl RuleError {
    /// Create condition error
    pub fn invalid_condition(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCondition {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    /// Create event error
    pub fn invalid_event(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEvent {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

/// Matching errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// A condition references a fact that was not supplied
    #[error("undefined fact: '{0}'")]
    UndefinedFact(String),

    /// Failure while matching a specific rule
    #[error("rule '{rule}' failed: {source}")]
    InRule {
        /// Rule being matched
        rule: String,
        /// Underlying failure
        #[source]
        source: Box<EvaluationError>,
    },
}

impl EvaluationError {
    /// Attach the rule name
    #[must_use]
    pub fn in_rule(self, rule: impl Into<String>) -> Self {
        Self::InRule {
            rule: rule.into(),
            source: Box::new(self),
        }
    }

    /// Name of the failing rule, if known
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::InRule { rule, .. } => Some(rule),
            Self::UndefinedFact(_) => None,
        }
    }
}
