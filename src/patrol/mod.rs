//! Patrol mode - polls the token sources and alerts on new tokens.
//!
//! A pass asks Birdeye first and DexScreener only when Birdeye is unavailable,
//! filters out addresses already alerted in this process, and sends one alert
//! per new token. The scheduler repeats that pass at a fixed interval.

pub mod cycle;
pub mod scheduler;
pub mod seen_set;
pub mod sources;

pub use cycle::{PatrolCycle, PatrolReport};
pub use scheduler::{IterationOutcome, PatrolScheduler};
pub use seen_set::SeenSet;
pub use sources::{BirdeyeSource, DexScreenerSource, TokenSource};

use crate::alerts::TelegramSender;
use crate::config::Config;
use reqwest::Client;
use std::sync::Arc;

/// Wire the production sources and sender into a scheduler.
pub fn build_scheduler(config: &Config, http_client: Client) -> PatrolScheduler {
    let primary = Arc::new(BirdeyeSource::new(http_client.clone(), &config.sources));
    let fallback = Arc::new(DexScreenerSource::new(http_client.clone(), &config.sources));
    let sender = Arc::new(TelegramSender::new(http_client, config.telegram.clone()));

    let cycle = PatrolCycle::new(primary, fallback, sender, config.dispatch_delay);
    PatrolScheduler::new(Arc::new(cycle), config.patrol_interval)
}
