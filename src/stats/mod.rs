//! Shared aggregate statistics.
//!
//! The core only ever applies monotonic increments to these counters and
//! never reads them for decision-making. Because several tabs or devices may
//! increment concurrently, every mutation goes through
//! [`CounterStore::transact_increment`], an atomic read-modify-write against
//! the backend, never a local read-then-write.

mod firebase;
mod memory;
mod tracker;

pub use firebase::FirebaseStatsClient;
pub use memory::MemoryCounterStore;
pub use tracker::StatsTracker;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::classify::BatchReport;
use crate::errors::Result;
use crate::types::ItemKind;

/// Point-in-time view of the global counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    #[serde(default)]
    pub wallets_connected: u64,
    #[serde(default)]
    pub assets_scanned: u64,
    #[serde(default)]
    pub assets_legit: u64,
    #[serde(default)]
    pub assets_dubious: u64,
    #[serde(default)]
    pub assets_scam: u64,
    #[serde(default)]
    pub assets_burned: u64,
    #[serde(default)]
    pub tokens_scanned: u64,
    #[serde(default)]
    pub tokens_legit: u64,
    #[serde(default)]
    pub tokens_dubious: u64,
    #[serde(default)]
    pub tokens_scam: u64,
    #[serde(default)]
    pub tokens_burned: u64,
}

impl CounterSnapshot {
    /// Seed values used when the backend has no stats yet.
    pub fn seed() -> Self {
        Self {
            wallets_connected: 1,
            assets_scanned: 3,
            assets_legit: 1,
            assets_dubious: 1,
            assets_scam: 1,
            assets_burned: 1,
            ..Default::default()
        }
    }

    /// Applies `delta` in place, saturating on overflow.
    pub fn apply(&mut self, delta: &CounterDelta) {
        self.wallets_connected = self.wallets_connected.saturating_add(delta.wallets_connected);
        self.assets_scanned = self.assets_scanned.saturating_add(delta.assets_scanned);
        self.assets_legit = self.assets_legit.saturating_add(delta.assets_legit);
        self.assets_dubious = self.assets_dubious.saturating_add(delta.assets_dubious);
        self.assets_scam = self.assets_scam.saturating_add(delta.assets_scam);
        self.assets_burned = self.assets_burned.saturating_add(delta.assets_burned);
        self.tokens_scanned = self.tokens_scanned.saturating_add(delta.tokens_scanned);
        self.tokens_legit = self.tokens_legit.saturating_add(delta.tokens_legit);
        self.tokens_dubious = self.tokens_dubious.saturating_add(delta.tokens_dubious);
        self.tokens_scam = self.tokens_scam.saturating_add(delta.tokens_scam);
        self.tokens_burned = self.tokens_burned.saturating_add(delta.tokens_burned);
    }
}

/// Monotonic increment applied to the counters in one transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub wallets_connected: u64,
    pub assets_scanned: u64,
    pub assets_legit: u64,
    pub assets_dubious: u64,
    pub assets_scam: u64,
    pub assets_burned: u64,
    pub tokens_scanned: u64,
    pub tokens_legit: u64,
    pub tokens_dubious: u64,
    pub tokens_scam: u64,
    pub tokens_burned: u64,
}

impl CounterDelta {
    /// One newly connected wallet.
    pub fn connection() -> Self {
        Self {
            wallets_connected: 1,
            ..Default::default()
        }
    }

    /// A completed scan's tallies for one collection kind.
    pub fn scan(kind: ItemKind, report: &BatchReport) -> Self {
        let mut delta = Self::default();
        match kind {
            ItemKind::Asset => {
                delta.assets_scanned = report.total as u64;
                delta.assets_legit = report.legit as u64;
                delta.assets_dubious = report.dubious as u64;
                delta.assets_scam = report.scam as u64;
            }
            ItemKind::Token => {
                delta.tokens_scanned = report.total as u64;
                delta.tokens_legit = report.legit as u64;
                delta.tokens_dubious = report.dubious as u64;
                delta.tokens_scam = report.scam as u64;
            }
        }
        delta
    }

    /// `count` items destroyed.
    pub fn burn(kind: ItemKind, count: u64) -> Self {
        let mut delta = Self::default();
        match kind {
            ItemKind::Asset => delta.assets_burned = count,
            ItemKind::Token => delta.tokens_burned = count,
        }
        delta
    }
}

/// Backend holding the shared counters and the per-fact tracking markers.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current counter values, for display.
    async fn read_counters(&self) -> Result<CounterSnapshot>;

    /// Atomically applies `delta`. Safe under concurrent writers.
    async fn transact_increment(&self, delta: CounterDelta) -> Result<()>;

    /// Whether `fact` has already triggered its one-time increment.
    async fn is_tracked(&self, fact: &str) -> Result<bool>;

    /// Records `fact` so it never triggers again.
    async fn mark_tracked(&self, fact: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_accumulates() {
        let mut snapshot = CounterSnapshot::default();
        snapshot.apply(&CounterDelta::connection());
        snapshot.apply(&CounterDelta::connection());
        assert_eq!(snapshot.wallets_connected, 2);
    }

    #[test]
    fn test_scan_delta_targets_the_right_kind() {
        let report = BatchReport {
            total: 5,
            legit: 2,
            dubious: 2,
            scam: 1,
        };

        let assets = CounterDelta::scan(ItemKind::Asset, &report);
        assert_eq!(assets.assets_scanned, 5);
        assert_eq!(assets.assets_scam, 1);
        assert_eq!(assets.tokens_scanned, 0);

        let tokens = CounterDelta::scan(ItemKind::Token, &report);
        assert_eq!(tokens.tokens_scanned, 5);
        assert_eq!(tokens.assets_scanned, 0);
    }

    #[test]
    fn test_snapshot_deserializes_with_missing_fields() {
        // Older backends may not carry the token counters yet.
        let snapshot: CounterSnapshot =
            serde_json::from_str(r#"{"wallets_connected": 7}"#).unwrap();
        assert_eq!(snapshot.wallets_connected, 7);
        assert_eq!(snapshot.tokens_scanned, 0);
    }
}
