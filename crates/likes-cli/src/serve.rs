//! `likes serve` — run the API server in the foreground.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use likes_api::config::AppConfig;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on. Overrides the config file and `LIKES_PORT`.
    #[arg(long)]
    pub port: Option<u16>,
}

/// Resolve the configuration `serve` would run with.
pub fn effective_config(args: &ServeArgs, config_path: Option<&Path>) -> Result<AppConfig> {
    let mut config = AppConfig::from_env(config_path).context("loading configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    Ok(config)
}

/// Install tracing per the config and block on the server.
pub fn run_serve(args: &ServeArgs, config_path: Option<&Path>, log_filter: &str) -> Result<u8> {
    let config = effective_config(args, config_path)?;
    likes_api::init_tracing(config.log_format, log_filter);
    tracing::info!(port = config.port, fixture = ?config.fixture, "starting likes-api");

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(likes_api::serve(config))?;
    Ok(0)
}
