//! Alert delivery - formatting and sending messages to the Telegram channel.
//!
//! Both entry points (patrol loop and webhook receiver) talk to Telegram only
//! through the [`AlertSink`] trait, which lets tests swap in an in-memory sink.

pub mod format;
pub mod telegram;

use async_trait::async_trait;

pub use format::{format_token_alert, webhook_ack_message};
pub use telegram::TelegramSender;

/// What happened to a single alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Accepted by the messaging API
    Delivered,
    /// Not attempted because the bot token or channel is missing
    Skipped,
    /// Transport failure or rejection by the messaging API
    Failed,
}

/// Destination for alert messages.
///
/// Implementations swallow and log their own failures; callers only learn the
/// outcome and are never interrupted by a delivery problem.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Send `text` to the configured channel. `rich` enables HTML markup.
    async fn dispatch(&self, text: &str, rich: bool) -> DeliveryOutcome;
}
