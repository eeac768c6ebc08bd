//! Shared server state

use crate::config::ServerConfig;
use crate::cookie::CookieSigner;
use pizzeria_cart::CartService;
use pizzeria_catalog::{InMemoryCatalog, ProductRepository};
use pizzeria_rules::{RuleError, RuleRegistry};
use std::sync::Arc;

/// Handles every request shares
#[derive(Clone)]
pub struct AppState {
    /// Product lookups
    pub catalog: Arc<dyn ProductRepository>,
    /// Promotion rules
    pub registry: Arc<RuleRegistry>,
    /// Session cookie codec
    pub cookies: Arc<CookieSigner>,
    /// Settings the server was started with
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state with the built-in menu
    ///
    /// # Errors
    /// [`RuleError`] if the sample rules fail validation.
    pub fn new(config: ServerConfig) -> Result<Self, RuleError> {
        let registry = if config.sample_rules {
            RuleRegistry::with_samples()?
        } else {
            RuleRegistry::new()
        };
        Ok(Self::with_parts(
            Arc::new(InMemoryCatalog::with_samples()),
            Arc::new(registry),
            config,
        ))
    }

    /// Build state from explicit parts
    #[must_use]
    pub fn with_parts(
        catalog: Arc<dyn ProductRepository>,
        registry: Arc<RuleRegistry>,
        config: ServerConfig,
    ) -> Self {
        let cookies = CookieSigner::new(&config.session_secret, config.cookie_max_age);
        Self {
            catalog,
            registry,
            cookies: Arc::new(cookies),
            config: Arc::new(config),
        }
    }

    /// Cart operations bound to this state
    #[must_use]
    pub fn cart(&self) -> CartService<'_, dyn ProductRepository> {
        CartService::new(self.catalog.as_ref(), &self.registry)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("rules", &self.registry.len())
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .finish_non_exhaustive()
    }
}
