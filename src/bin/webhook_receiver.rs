//! Webhook entry point: acknowledges pushes from the indexing service.

use anyhow::{Context, Result};
use pump_sentinel::alerts::TelegramSender;
use pump_sentinel::{logging, webhook, Config};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    info!("Starting pump-sentinel webhook receiver");

    let config = Config::from_env().context("Invalid configuration")?;
    if !config.telegram.is_configured() {
        tracing::error!("BOT_TOKEN or CHANNEL_ID not configured; acknowledgments will be skipped");
    }

    let sender = Arc::new(TelegramSender::new(
        reqwest::Client::new(),
        config.telegram.clone(),
    ));

    tokio::select! {
        result = webhook::serve(config.webhook_bind_addr, sender) => {
            result.with_context(|| {
                format!("Webhook server on {} failed", config.webhook_bind_addr)
            })?;
        }
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received. Stopping webhook receiver.");
        }
    }

    Ok(())
}
