//! One patrol pass: fetch (primary, then fallback), deduplicate, alert.

use crate::alerts::{format_token_alert, AlertSink, DeliveryOutcome};
use crate::patrol::seen_set::SeenSet;
use crate::patrol::sources::TokenSource;
use crate::types::{CandidateToken, SourceKind};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Summary of a single patrol pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolReport {
    pub started_at: DateTime<Utc>,
    /// The source whose answer was used; `None` when both were unavailable
    pub source: Option<SourceKind>,
    /// Tokens returned by that source
    pub fetched: usize,
    /// Tokens not seen before
    pub new: usize,
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl PatrolReport {
    fn empty(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            source: None,
            fetched: 0,
            new: 0,
            delivered: 0,
            failed: 0,
            skipped: 0,
        }
    }

    /// Both sources were unavailable.
    pub fn is_aborted(&self) -> bool {
        self.source.is_none()
    }

    fn record(&mut self, outcome: DeliveryOutcome) {
        match outcome {
            DeliveryOutcome::Delivered => self.delivered += 1,
            DeliveryOutcome::Failed => self.failed += 1,
            DeliveryOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Owns the seen-set and the collaborators needed for a patrol pass.
pub struct PatrolCycle {
    primary: Arc<dyn TokenSource>,
    fallback: Arc<dyn TokenSource>,
    sink: Arc<dyn AlertSink>,
    seen: SeenSet,
    dispatch_delay: Duration,
}

impl PatrolCycle {
    pub fn new(
        primary: Arc<dyn TokenSource>,
        fallback: Arc<dyn TokenSource>,
        sink: Arc<dyn AlertSink>,
        dispatch_delay: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            sink,
            seen: SeenSet::new(),
            dispatch_delay,
        }
    }

    /// The deduplication ledger.
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Run one pass.
    pub async fn run_once(&self) -> PatrolReport {
        let mut report = PatrolReport::empty(Utc::now());
        info!("Starting patrol");

        let (source, tokens) = match self.fetch().await {
            Some(found) => found,
            None => {
                warn!("Both sources are unavailable. Ending patrol.");
                return report;
            }
        };
        report.source = Some(source);
        report.fetched = tokens.len();

        let fresh = self.new_tokens(tokens).await;
        report.new = fresh.len();

        if fresh.is_empty() {
            info!("No new tokens this time");
            return report;
        }
        info!("{} new tokens identified from {}", fresh.len(), source);

        if let Ok(first) = serde_json::to_string_pretty(&fresh[0]) {
            info!("First new token:\n{}", first);
        }

        let last = fresh.len() - 1;
        for (i, token) in fresh.iter().enumerate() {
            if !token.is_actionable() {
                continue;
            }

            let message = format_token_alert(token);
            let outcome = self.sink.dispatch(&message, true).await;
            report.record(outcome);

            // Marked even on failure so a broken send isn't retried every cycle
            self.seen.insert(token.address.clone()).await;

            if i < last && !self.dispatch_delay.is_zero() {
                tokio::time::sleep(self.dispatch_delay).await;
            }
        }

        info!(
            "Patrol complete: {} delivered, {} failed, {} skipped",
            report.delivered, report.failed, report.skipped
        );
        report
    }

    /// Primary first; the fallback is consulted only when the primary is unavailable.
    async fn fetch(&self) -> Option<(SourceKind, Vec<CandidateToken>)> {
        match self.primary.fetch_tokens().await {
            Ok(tokens) => return Some((self.primary.kind(), tokens)),
            Err(e) => warn!("{} unavailable: {}", self.primary.kind(), e),
        }

        info!("Falling back to {}", self.fallback.kind());
        match self.fallback.fetch_tokens().await {
            Ok(tokens) => Some((self.fallback.kind(), tokens)),
            Err(e) => {
                warn!("{} unavailable: {}", self.fallback.kind(), e);
                None
            }
        }
    }

    /// Actionable tokens unseen before this pass, in source order.
    async fn new_tokens(&self, tokens: Vec<CandidateToken>) -> Vec<CandidateToken> {
        let seen = self.seen.snapshot().await;

        tokens
            .into_iter()
            .filter(|t| t.is_actionable())
            .filter(|t| !seen.contains(&t.address))
            .collect()
    }
}
