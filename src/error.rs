//! Error types shared across the relay.

use thiserror::Error;

/// Reasons a token source could not produce a listing.
///
/// Any of these means "unavailable", which is distinct from a successful
/// response with zero tokens.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Reasons an alert could not be delivered.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("BOT_TOKEN or CHANNEL_ID not configured")]
    NotConfigured,
    #[error("Telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Telegram API rejected message (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Invalid values in the process environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },
}
