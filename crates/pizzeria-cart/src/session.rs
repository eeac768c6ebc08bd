//! Session storage
//!
//! A [`Session`] is a string key-value map holding the cart (as a JSON array)
//! and the voucher code. How it reaches the client is the transport's
//! business; the server crate signs it into a cookie.

use crate::error::CartError;
use crate::line::CartLine;
use std::collections::BTreeMap;

/// Session key holding the serialized cart
pub const CART_SESSION_KEY: &str = "CART_SESSION_KEY";

/// Session key holding the voucher code
pub const VOUCHER_SESSION_KEY: &str = "VOUCHER_SESSION_KEY";

/// Per-client key-value state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl Session {
    /// Create empty session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session from stored values
    #[inline]
    #[must_use]
    pub fn from_values(values: BTreeMap<String, String>) -> Self {
        Self {
            values,
            dirty: false,
        }
    }

    /// Raw stored values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Raw value for `key`
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set raw value for `key`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
        self.dirty = true;
    }

    /// Whether anything was set since the session was restored
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cart lines; a missing or unreadable cart is empty
    #[must_use]
    pub fn cart(&self) -> Vec<CartLine> {
        let Some(raw) = self.get(CART_SESSION_KEY) else {
            return Vec::new();
        };

        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding unreadable cart in session");
            Vec::new()
        })
    }

    /// Store cart lines
    ///
    /// # Errors
    /// [`CartError::Session`] if the lines cannot be serialized.
    pub fn set_cart(&mut self, lines: &[CartLine]) -> Result<(), CartError> {
        let raw = serde_json::to_string(lines)?;
        self.set(CART_SESSION_KEY, raw);
        Ok(())
    }

    /// Voucher code; empty when none was applied
    #[must_use]
    pub fn voucher(&self) -> String {
        self.get(VOUCHER_SESSION_KEY).unwrap_or_default().to_string()
    }

    /// Store voucher code
    pub fn set_voucher(&mut self, code: &str) {
        self.set(VOUCHER_SESSION_KEY, code);
    }
}
