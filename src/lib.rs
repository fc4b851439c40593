//! pump-sentinel - new-token alert relay for Solana launchpads
//!
//! This crate watches token listing providers for freshly created pump.fun
//! tokens and relays one Telegram alert per new token. It also ships a small
//! webhook receiver that acknowledges pushes from an indexing service.

pub mod alerts;
pub mod config;
pub mod error;
pub mod logging;
pub mod patrol;
pub mod types;
pub mod webhook;

// Re-export main types for convenience
pub use config::Config;
pub use types::{CandidateToken, SourceKind};
