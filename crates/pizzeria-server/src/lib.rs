//! Pizzeria storefront server
//!
//! HTTP surface over the cart and the promotion rules, with the session
//! carried in a signed cookie.
//!
//! # Core Concepts
//!
//! - [`ServerConfig`]: Flags with environment fallbacks
//! - [`AppState`]: Catalog, rule registry and cookie signer shared by requests
//! - [`routes`]: The warp filter tree
//! - [`CookieSigner`]: HMAC-signed `__session` cookie
//!
//! # Example
//!
//! ```rust,no_run
//! use pizzeria_server::{routes, AppState, ServerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::default().with_port(8080);
//! let addr = config.socket_addr()?;
//! let state = AppState::new(config)?;
//!
//! warp::serve(routes(state)).run(addr).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod cookie;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

// Re-exports
pub use config::ServerConfig;
pub use cookie::{CookieError, CookieSigner, SESSION_COOKIE};
pub use error::ApiError;
pub use routes::routes;
pub use state::AppState;

use tokio::signal;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
