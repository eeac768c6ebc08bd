//! Pizzeria storefront binary
//!
//! Reads flags and env, installs logging, then serves the routes until
//! Ctrl-C or SIGTERM.

use anyhow::Context;
use pizzeria_server::{routes, shutdown_signal, telemetry, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    telemetry::init(config.log_json)
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing log subscriber")?;

    if config.uses_default_secret() {
        tracing::warn!("SESSION_SECRET is not set, using the development secret");
    }

    let addr = config.socket_addr().context("invalid listen address")?;
    let state = AppState::new(config).context("loading voucher rules")?;
    tracing::info!(rules = state.registry.len(), "rules loaded");

    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%bound, version = pizzeria_server::VERSION, "server running");
    server.await;
    tracing::info!("server stopped");

    Ok(())
}
