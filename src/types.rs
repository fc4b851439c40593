//! Core types and data structures for the pump-sentinel relay.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token address as reported by a provider (base58 mint on Solana).
pub type Address = String;

/// Which adapter produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Birdeye token list (authenticated)
    Primary,
    /// DexScreener latest pairs (unauthenticated)
    Fallback,
}

impl SourceKind {
    /// Human-readable provider label used in alerts and logs.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::Primary => "Birdeye",
            SourceKind::Fallback => "DexScreener",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A token discovered by one of the sources, pending deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateToken {
    /// The mint address. Empty when the provider omitted it.
    pub address: Address,
    /// Display name, if the provider has one
    pub name: Option<String>,
    /// Ticker symbol, if the provider has one
    pub symbol: Option<String>,
    /// The adapter that produced this record
    pub source: SourceKind,
}

impl CandidateToken {
    pub fn new(address: impl Into<Address>, source: SourceKind) -> Self {
        Self {
            address: address.into(),
            name: None,
            symbol: None,
            source,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Tokens without an address can't be deduplicated or linked, so they are dropped.
    pub fn is_actionable(&self) -> bool {
        !self.address.is_empty()
    }
}
