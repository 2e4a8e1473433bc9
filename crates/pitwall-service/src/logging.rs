//! Logging bootstrap

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber filtered by `filter`
///
/// `RUST_LOG`, when set, takes precedence over `filter`. Fails if the
/// directive does not parse or a subscriber is already installed.
pub fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(filter)
            .with_context(|| format!("Invalid log filter: {filter}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("Failed to install tracing subscriber")
}
