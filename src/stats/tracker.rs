//! One-time contribution tracking.
//!
//! Each distinct wallet contributes to "wallets connected" at most once over
//! the store's lifetime, and to the per-kind scan tallies at most once per
//! wallet+kind pair; reconnecting or rescanning tomorrow does not count
//! again. Burns are never deduplicated: every burn is a distinct destructive
//! action.

use std::sync::Arc;
use tracing::{debug, info};

use super::{CounterDelta, CounterSnapshot, CounterStore};
use crate::classify::BatchReport;
use crate::errors::Result;
use crate::types::ItemKind;

pub struct StatsTracker {
    counters: Arc<dyn CounterStore>,
}

impl StatsTracker {
    pub fn new(counters: Arc<dyn CounterStore>) -> Self {
        Self { counters }
    }

    fn normalize_address(address: &str) -> String {
        address.trim().to_lowercase()
    }

    fn connect_fact(address: &str) -> String {
        format!("connected:{}", Self::normalize_address(address))
    }

    fn scan_fact(kind: ItemKind, address: &str) -> String {
        format!("scanned:{}:{}", kind, Self::normalize_address(address))
    }

    /// Counts a wallet connection once per distinct (case-folded) address.
    /// Returns whether this call caused an increment.
    pub async fn track_connection(&self, address: &str) -> Result<bool> {
        let fact = Self::connect_fact(address);
        if self.counters.is_tracked(&fact).await? {
            debug!(address, "wallet already tracked, skipping");
            return Ok(false);
        }
        self.counters
            .transact_increment(CounterDelta::connection())
            .await?;
        self.counters.mark_tracked(&fact).await?;
        info!(address, "new wallet connection tracked");
        Ok(true)
    }

    /// Contributes a completed batch's tallies once per wallet+kind pair.
    /// Callers must only invoke this with the report of a fully classified
    /// collection. Returns whether this call caused an increment.
    pub async fn track_scan(
        &self,
        address: &str,
        kind: ItemKind,
        report: &BatchReport,
    ) -> Result<bool> {
        let fact = Self::scan_fact(kind, address);
        if self.counters.is_tracked(&fact).await? {
            debug!(address, %kind, "scan already tracked, skipping");
            return Ok(false);
        }
        self.counters
            .transact_increment(CounterDelta::scan(kind, report))
            .await?;
        self.counters.mark_tracked(&fact).await?;
        info!(
            address,
            %kind,
            total = report.total,
            legit = report.legit,
            dubious = report.dubious,
            scam = report.scam,
            "scan tracked"
        );
        Ok(true)
    }

    /// Counts `count` burned items. Never deduplicated.
    pub async fn track_burn(&self, kind: ItemKind, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        self.counters
            .transact_increment(CounterDelta::burn(kind, count as u64))
            .await?;
        info!(%kind, count, "burn tracked");
        Ok(())
    }

    /// Current counter values, for display.
    pub async fn counters(&self) -> Result<CounterSnapshot> {
        self.counters.read_counters().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MemoryCounterStore;

    fn tracker() -> StatsTracker {
        StatsTracker::new(Arc::new(MemoryCounterStore::new()))
    }

    #[tokio::test]
    async fn test_connection_counted_once_per_address() {
        let tracker = tracker();

        assert!(tracker.track_connection("0xAbC").await.unwrap());
        // Same address, different casing.
        assert!(!tracker.track_connection("0xabc").await.unwrap());
        assert!(!tracker.track_connection(" 0xABC ").await.unwrap());

        assert_eq!(tracker.counters().await.unwrap().wallets_connected, 1);
    }

    #[tokio::test]
    async fn test_scan_counted_once_per_wallet_and_kind() {
        let tracker = tracker();
        let report = BatchReport {
            total: 4,
            legit: 1,
            dubious: 2,
            scam: 1,
        };

        assert!(tracker
            .track_scan("0xabc", ItemKind::Asset, &report)
            .await
            .unwrap());
        assert!(!tracker
            .track_scan("0xABC", ItemKind::Asset, &report)
            .await
            .unwrap());
        // A different kind for the same wallet still counts.
        assert!(tracker
            .track_scan("0xabc", ItemKind::Token, &report)
            .await
            .unwrap());

        let counters = tracker.counters().await.unwrap();
        assert_eq!(counters.assets_scanned, 4);
        assert_eq!(counters.tokens_scanned, 4);
    }

    #[tokio::test]
    async fn test_burns_are_never_deduplicated() {
        let tracker = tracker();
        tracker.track_burn(ItemKind::Asset, 2).await.unwrap();
        tracker.track_burn(ItemKind::Asset, 3).await.unwrap();
        tracker.track_burn(ItemKind::Asset, 0).await.unwrap();

        assert_eq!(tracker.counters().await.unwrap().assets_burned, 5);
    }
}
