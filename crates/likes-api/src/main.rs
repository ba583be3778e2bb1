//! # likes-api — Binary Entry Point
//!
//! Loads configuration (`$LIKES_CONFIG` plus `LIKES_*` overrides), seeds the
//! in-memory stores from the configured fixture, and serves the API.

use anyhow::Context;

use likes_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env(None).context("loading configuration")?;
    likes_api::init_tracing(config.log_format, "info");
    likes_api::serve(config).await
}
