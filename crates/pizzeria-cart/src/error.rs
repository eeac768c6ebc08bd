//! Error types for cart operations

use pizzeria_catalog::ProductId;

/// Cart operation errors
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Product id is not in the catalog
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Cart could not be written to the session
    #[error("session encoding failed: {0}")]
    Session(#[from] serde_json::Error),
}

impl CartError {
    /// Check if error is the caller's fault
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ProductNotFound(_))
    }
}
