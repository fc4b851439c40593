//! Patrol entry point: polls token sources and alerts on new tokens.

use anyhow::{Context, Result};
use pump_sentinel::{logging, patrol, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    info!("Starting pump-sentinel patrol service");

    let config = Config::from_env().context("Invalid configuration")?;
    config.log_summary();

    let http_client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let scheduler = patrol::build_scheduler(&config, http_client);

    tokio::select! {
        _ = scheduler.run() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received. Stopping patrol.");
        }
    }

    Ok(())
}
