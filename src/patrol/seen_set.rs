//! Deduplication ledger of addresses that already produced an alert.
//!
//! Lives only as long as the process. Nothing is ever removed; a restart
//! starts from an empty set and may re-alert recent tokens.

use crate::types::Address;
use std::collections::HashSet;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct SeenSet {
    addresses: RwLock<HashSet<Address>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, address: &str) -> bool {
        self.addresses.read().await.contains(address)
    }

    /// Record an address. Returns false if it was already present.
    pub async fn insert(&self, address: impl Into<Address>) -> bool {
        self.addresses.write().await.insert(address.into())
    }

    pub async fn len(&self) -> usize {
        self.addresses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.addresses.read().await.is_empty()
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> HashSet<Address> {
        self.addresses.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let seen = SeenSet::new();
        assert!(seen.is_empty().await);
        assert!(!seen.contains("A1").await);
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let seen = SeenSet::new();

        assert!(seen.insert("A1").await);
        assert!(!seen.insert("A1").await);
        assert!(seen.contains("A1").await);
        assert_eq!(seen.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_reflects_contents() {
        let seen = SeenSet::new();
        seen.insert("A1").await;
        seen.insert("B1").await;

        let snapshot = seen.snapshot().await;
        assert!(snapshot.contains("A1") && snapshot.contains("B1"));
        assert_eq!(snapshot.len(), 2);
    }
}
