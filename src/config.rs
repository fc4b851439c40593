//! Runtime configuration, loaded once from the environment at startup.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIRDEYE_BASE_URL: &str = "https://public-api.birdeye.so/defi";
pub const DEFAULT_DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_WEBHOOK_BIND_ADDR: &str = "0.0.0.0:8080";

/// Telegram destination and credential.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot credential (BOT_TOKEN)
    pub bot_token: Option<String>,
    /// Destination chat or channel (CHANNEL_ID)
    pub channel_id: Option<String>,
    /// Base URL of the Bot API
    pub api_base: String,
}

impl TelegramConfig {
    /// Both the token and the channel are present.
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.channel_id.is_some()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            channel_id: None,
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
        }
    }
}

/// Endpoints and credentials for the token sources.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    /// Birdeye credential (BIRDEYE_API_KEY)
    pub birdeye_api_key: Option<String>,
    pub birdeye_base_url: String,
    pub dexscreener_base_url: String,
    /// Per-request timeout applied to both sources
    pub http_timeout: Duration,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            birdeye_api_key: None,
            birdeye_base_url: DEFAULT_BIRDEYE_BASE_URL.to_string(),
            dexscreener_base_url: DEFAULT_DEXSCREENER_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(20),
        }
    }
}

/// Full relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub sources: SourcesConfig,
    /// Sleep between two patrol cycles
    pub patrol_interval: Duration,
    /// Pause between two alerts within a cycle
    pub dispatch_delay: Duration,
    /// Listen address of the webhook receiver
    pub webhook_bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            telegram: TelegramConfig::default(),
            sources: SourcesConfig::default(),
            patrol_interval: Duration::from_secs(300),
            dispatch_delay: Duration::from_secs(1),
            webhook_bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Missing secrets are not an error here: the components that need them
    /// degrade to logged no-ops. Malformed numbers and addresses are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values behave like unset ones
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let telegram = TelegramConfig {
            bot_token: get("BOT_TOKEN"),
            channel_id: get("CHANNEL_ID"),
            api_base: get("TELEGRAM_API_BASE").unwrap_or(defaults.telegram.api_base),
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_u64("HTTP_TIMEOUT_SECS", &v)?),
            None => defaults.sources.http_timeout,
        };

        let sources = SourcesConfig {
            birdeye_api_key: get("BIRDEYE_API_KEY"),
            birdeye_base_url: get("BIRDEYE_BASE_URL").unwrap_or(defaults.sources.birdeye_base_url),
            dexscreener_base_url: get("DEXSCREENER_BASE_URL")
                .unwrap_or(defaults.sources.dexscreener_base_url),
            http_timeout,
        };

        let patrol_interval = match get("PATROL_INTERVAL_SECS") {
            Some(v) => Duration::from_secs(parse_u64("PATROL_INTERVAL_SECS", &v)?),
            None => defaults.patrol_interval,
        };

        let dispatch_delay = match get("DISPATCH_DELAY_MS") {
            Some(v) => Duration::from_millis(parse_u64("DISPATCH_DELAY_MS", &v)?),
            None => defaults.dispatch_delay,
        };

        let webhook_bind_addr = match get("WEBHOOK_BIND_ADDR") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidAddr {
                var: "WEBHOOK_BIND_ADDR",
                value: v.clone(),
            })?,
            None => defaults.webhook_bind_addr,
        };

        Ok(Self {
            telegram,
            sources,
            patrol_interval,
            dispatch_delay,
            webhook_bind_addr,
        })
    }

    pub fn with_patrol_interval(mut self, interval: Duration) -> Self {
        self.patrol_interval = interval;
        self
    }

    pub fn with_dispatch_delay(mut self, delay: Duration) -> Self {
        self.dispatch_delay = delay;
        self
    }

    pub fn with_telegram(
        mut self,
        bot_token: impl Into<String>,
        channel_id: impl Into<String>,
    ) -> Self {
        self.telegram.bot_token = Some(bot_token.into());
        self.telegram.channel_id = Some(channel_id.into());
        self
    }

    pub fn with_birdeye_api_key(mut self, key: impl Into<String>) -> Self {
        self.sources.birdeye_api_key = Some(key.into());
        self
    }

    /// Log which optional pieces are missing, without printing secrets.
    pub fn log_summary(&self) {
        if !self.telegram.is_configured() {
            tracing::error!("BOT_TOKEN or CHANNEL_ID not configured; alerts will be skipped");
        }
        if self.sources.birdeye_api_key.is_none() {
            tracing::warn!("BIRDEYE_API_KEY not configured; Birdeye will be reported unavailable");
        }
        tracing::info!(
            "Patrol interval {}s, dispatch delay {}ms, HTTP timeout {}s",
            self.patrol_interval.as_secs(),
            self.dispatch_delay.as_millis(),
            self.sources.http_timeout.as_secs()
        );
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}
