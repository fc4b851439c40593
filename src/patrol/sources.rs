//! Token source adapters.
//!
//! Each adapter queries one external HTTP API and normalizes the response into
//! [`CandidateToken`]s. `Err` means the source is unavailable; `Ok(vec![])`
//! means it answered with nothing new. The patrol cycle relies on that
//! distinction to decide whether to fall back.

use crate::config::SourcesConfig;
use crate::error::SourceError;
use crate::types::{CandidateToken, SourceKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, instrument};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";

/// Page size requested from Birdeye.
pub const BIRDEYE_PAGE_SIZE: u32 = 50;

/// DexScreener `dexId` of the pump.fun launchpad.
pub const PUMP_DEX_ID: &str = "pump";

/// A provider of recently created tokens.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Which slot this source occupies in the patrol.
    fn kind(&self) -> SourceKind;

    /// Fetch the latest tokens, newest first as the provider orders them.
    async fn fetch_tokens(&self) -> Result<Vec<CandidateToken>, SourceError>;
}

// --- Birdeye ---

/// Primary source: Birdeye `tokenlist`, sorted by creation time.
pub struct BirdeyeSource {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl BirdeyeSource {
    pub fn new(http_client: Client, config: &SourcesConfig) -> Self {
        Self {
            http_client,
            base_url: config.birdeye_base_url.trim_end_matches('/').to_string(),
            api_key: config.birdeye_api_key.clone(),
            timeout: config.http_timeout,
        }
    }
}

#[async_trait]
impl TokenSource for BirdeyeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Primary
    }

    #[instrument(skip(self), name = "birdeye")]
    async fn fetch_tokens(&self) -> Result<Vec<CandidateToken>, SourceError> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::MissingApiKey)?;
        info!("Querying Birdeye token list");

        let limit = BIRDEYE_PAGE_SIZE.to_string();
        let response = self
            .http_client
            .get(format!("{}/tokenlist", self.base_url))
            .header("X-API-KEY", api_key)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .query(&[
                ("sort_by", "creationTime"),
                ("sort_type", "desc"),
                ("offset", "0"),
                ("limit", limit.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let tokens = parse_birdeye(&body)?;
        info!("Birdeye returned {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Normalize a Birdeye response body.
///
/// Anything but `success: true` yields an empty list. Records are read
/// field by field, so one odd token cannot hide the rest of the listing.
pub(crate) fn parse_birdeye(body: &str) -> Result<Vec<CandidateToken>, SourceError> {
    let response = parse_object(body)?;

    if response.get("success") != Some(&Value::Bool(true)) {
        return Ok(Vec::new());
    }

    let tokens = response
        .get("data")
        .and_then(|d| d.get("tokens"))
        .and_then(Value::as_array)
        .map(|tokens| {
            tokens
                .iter()
                .filter(|t| t.is_object())
                .map(|t| token_from(t, SourceKind::Primary))
                .collect()
        })
        .unwrap_or_default();

    Ok(tokens)
}

// --- DexScreener ---

/// Fallback source: DexScreener latest Solana pairs, restricted to pump.fun.
pub struct DexScreenerSource {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl DexScreenerSource {
    pub fn new(http_client: Client, config: &SourcesConfig) -> Self {
        Self {
            http_client,
            base_url: config.dexscreener_base_url.trim_end_matches('/').to_string(),
            timeout: config.http_timeout,
        }
    }
}

#[async_trait]
impl TokenSource for DexScreenerSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fallback
    }

    #[instrument(skip(self), name = "dexscreener")]
    async fn fetch_tokens(&self) -> Result<Vec<CandidateToken>, SourceError> {
        info!("Querying DexScreener latest Solana pairs");

        let response = self
            .http_client
            .get(format!("{}/latest/pairs/solana", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        let tokens = parse_dexscreener(&body)?;
        info!("DexScreener returned {} pump.fun pairs", tokens.len());
        Ok(tokens)
    }
}

/// Normalize a DexScreener response body, keeping only pump.fun pairs.
pub(crate) fn parse_dexscreener(body: &str) -> Result<Vec<CandidateToken>, SourceError> {
    let response = parse_object(body)?;

    let tokens = response
        .get("pairs")
        .and_then(Value::as_array)
        .map(|pairs| {
            pairs
                .iter()
                .filter(|p| p.get("dexId").and_then(Value::as_str) == Some(PUMP_DEX_ID))
                .filter_map(|p| p.get("baseToken").filter(|t| t.is_object()))
                .map(|t| token_from(t, SourceKind::Fallback))
                .collect()
        })
        .unwrap_or_default();

    Ok(tokens)
}

/// The body must be a JSON object; anything else means the provider is unusable.
fn parse_object(body: &str) -> Result<Value, SourceError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    if !value.is_object() {
        return Err(SourceError::Decode("expected a JSON object".to_string()));
    }
    Ok(value)
}

/// Read address, name and symbol from a token object. Non-string values count as missing.
fn token_from(record: &Value, source: SourceKind) -> CandidateToken {
    let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

    CandidateToken {
        address: text("address").unwrap_or_default(),
        name: text("name"),
        symbol: text("symbol"),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birdeye_success_normalizes_tokens() {
        let body = r#"{
            "success": true,
            "data": {"tokens": [
                {"address": "A1", "name": "Alpha", "symbol": "ALP", "mc": 1234.5},
                {"address": "A2", "symbol": "BET"}
            ]}
        }"#;

        let tokens = parse_birdeye(body).unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].address, "A1");
        assert_eq!(tokens[0].name.as_deref(), Some("Alpha"));
        assert_eq!(tokens[0].source, SourceKind::Primary);
        assert_eq!(tokens[1].name, None);
    }

    #[test]
    fn test_birdeye_unsuccessful_is_empty_not_error() {
        let tokens = parse_birdeye(r#"{"success": false, "message": "limit"}"#).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_birdeye_missing_data_is_empty() {
        assert!(parse_birdeye(r#"{"success": true}"#).unwrap().is_empty());
        assert!(parse_birdeye(r#"{"success": true, "data": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_birdeye_token_without_address_keeps_empty_key() {
        let body = r#"{"success": true, "data": {"tokens": [{"name": "x"}]}}"#;
        let tokens = parse_birdeye(body).unwrap();
        assert_eq!(tokens.len(), 1);
        assert!(!tokens[0].is_actionable());
    }

    #[test]
    fn test_birdeye_non_boolean_success_is_empty_not_error() {
        assert!(parse_birdeye(r#"{"success": null}"#).unwrap().is_empty());
        assert!(parse_birdeye(r#"{"success": "true", "data": {"tokens": [{"address": "A1"}]}}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_birdeye_odd_record_does_not_hide_listing() {
        let body = r#"{
            "success": true,
            "data": {"tokens": [
                {"address": 42, "name": null, "symbol": ["X"]},
                "garbage",
                {"address": "A1", "name": {"en": "Alpha"}, "symbol": "ALP"}
            ]}
        }"#;

        let tokens = parse_birdeye(body).unwrap();

        assert_eq!(tokens.len(), 2);
        assert!(!tokens[0].is_actionable());
        assert_eq!(tokens[0].symbol, None);
        assert_eq!(tokens[1].address, "A1");
        assert_eq!(tokens[1].name, None);
        assert_eq!(tokens[1].symbol.as_deref(), Some("ALP"));
    }

    #[test]
    fn test_birdeye_non_list_tokens_is_empty() {
        let body = r#"{"success": true, "data": {"tokens": null}}"#;
        assert!(parse_birdeye(body).unwrap().is_empty());
    }

    #[test]
    fn test_birdeye_malformed_body_is_unavailable() {
        assert!(matches!(parse_birdeye("<html>"), Err(SourceError::Decode(_))));
        assert!(matches!(parse_birdeye("[]"), Err(SourceError::Decode(_))));
    }

    #[test]
    fn test_dexscreener_keeps_only_pump_pairs() {
        let body = r#"{"pairs": [
            {"dexId": "pump", "baseToken": {"address": "B1", "name": "Foo", "symbol": "FOO"}},
            {"dexId": "raydium", "baseToken": {"address": "B2", "name": "Bar", "symbol": "BAR"}}
        ]}"#;

        let tokens = parse_dexscreener(body).unwrap();

        assert_eq!(
            tokens,
            vec![CandidateToken::new("B1", SourceKind::Fallback)
                .with_name("Foo")
                .with_symbol("FOO")]
        );
    }

    #[test]
    fn test_dexscreener_skips_pairs_without_base_token() {
        let body = r#"{"pairs": [
            {"dexId": "pump"},
            {"dexId": "pump", "baseToken": {"address": "B3"}}
        ]}"#;
        let tokens = parse_dexscreener(body).unwrap();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].address, "B3");
    }

    #[test]
    fn test_dexscreener_odd_pairs_are_skipped() {
        let body = r#"{"pairs": [
            {"dexId": null, "baseToken": {"address": "B4"}},
            {"dexId": 7, "baseToken": {"address": "B5"}},
            {"dexId": "pump", "baseToken": "B6"},
            {"dexId": "pump", "baseToken": {"address": "B7", "symbol": 1}}
        ]}"#;

        let tokens = parse_dexscreener(body).unwrap();

        assert_eq!(tokens, vec![CandidateToken::new("B7", SourceKind::Fallback)]);
    }

    #[test]
    fn test_dexscreener_null_pairs_is_empty() {
        let body = r#"{"schemaVersion": "1.0.0", "pairs": null}"#;
        assert!(parse_dexscreener(body).unwrap().is_empty());
        assert!(parse_dexscreener("{}").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_birdeye_without_key_fails_before_request() {
        let config = SourcesConfig {
            birdeye_base_url: "http://127.0.0.1:1".to_string(),
            ..SourcesConfig::default()
        };
        let source = BirdeyeSource::new(Client::new(), &config);

        assert!(matches!(source.fetch_tokens().await, Err(SourceError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_unavailable() {
        let config = SourcesConfig {
            dexscreener_base_url: "http://127.0.0.1:1".to_string(),
            ..SourcesConfig::default()
        };
        let source = DexScreenerSource::new(Client::new(), &config);

        assert_eq!(source.kind(), SourceKind::Fallback);
        assert!(matches!(source.fetch_tokens().await, Err(SourceError::Transport(_))));
    }
}
