use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wc_finals_dashboard::config::ServerConfig;
use wc_finals_dashboard::dashboard::Dashboard;
use wc_finals_dashboard::server;

fn main() -> Result<()> {
    let config = ServerConfig::load();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Blocking fetch and build happen before any runtime exists; a failure
    // here ends the process without ever binding the port.
    let dashboard = Dashboard::load().context("startup data load failed")?;
    info!(
        finals = dashboard.finals.len(),
        countries = dashboard.country_options.len(),
        years = dashboard.year_options.len(),
        "dashboard ready"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(server::serve(&config, Arc::new(dashboard)))
}
