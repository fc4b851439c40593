//! Telegram Bot API sender.

use crate::alerts::{AlertSink, DeliveryOutcome};
use crate::config::TelegramConfig;
use crate::error::AlertError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info, warn};

/// Sends alerts to one Telegram chat via `sendMessage`.
#[derive(Clone)]
pub struct TelegramSender {
    http_client: Client,
    config: TelegramConfig,
}

impl TelegramSender {
    /// Create a sender that shares the given HTTP client.
    pub fn new(http_client: Client, config: TelegramConfig) -> Self {
        Self { http_client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Send a message, reporting every failure to the caller.
    pub async fn send_message(&self, text: &str, rich: bool) -> Result<(), AlertError> {
        let (bot_token, chat_id) = match (&self.config.bot_token, &self.config.channel_id) {
            (Some(token), Some(chat)) => (token, chat),
            _ => return Err(AlertError::NotConfigured),
        };

        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            bot_token
        );

        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });
        if rich {
            payload["parse_mode"] = json!("HTML");
        }

        let response = self
            .http_client
            .post(&url)
            .timeout(Duration::from_secs(20))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl AlertSink for TelegramSender {
    async fn dispatch(&self, text: &str, rich: bool) -> DeliveryOutcome {
        match self.send_message(text, rich).await {
            Ok(()) => {
                let preview: String = text.chars().take(30).collect();
                info!("Alert sent: {}...", preview);
                DeliveryOutcome::Delivered
            }
            Err(AlertError::NotConfigured) => {
                error!("Alert not sent: BOT_TOKEN or CHANNEL_ID not configured");
                DeliveryOutcome::Skipped
            }
            Err(e) => {
                warn!("Failed to send Telegram alert: {}", e);
                DeliveryOutcome::Failed
            }
        }
    }
}
