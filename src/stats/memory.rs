//! In-memory counter store.
//!
//! Snapshot and tracking markers live behind a single lock, which makes every
//! `transact_increment` an atomic read-modify-write. Serves as the source of
//! truth in single-user deployments and as the test double elsewhere.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

use super::{CounterDelta, CounterSnapshot, CounterStore};
use crate::errors::Result;

#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    counters: CounterSnapshot,
    tracked: HashSet<String>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the standard seed values instead of zeros.
    pub fn with_seed() -> Self {
        Self {
            state: Mutex::new(State {
                counters: CounterSnapshot::seed(),
                tracked: HashSet::new(),
            }),
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read_counters(&self) -> Result<CounterSnapshot> {
        Ok(self.state.lock().await.counters)
    }

    async fn transact_increment(&self, delta: CounterDelta) -> Result<()> {
        let mut state = self.state.lock().await;
        state.counters.apply(&delta);
        Ok(())
    }

    async fn is_tracked(&self, fact: &str) -> Result<bool> {
        Ok(self.state.lock().await.tracked.contains(fact))
    }

    async fn mark_tracked(&self, fact: &str) -> Result<()> {
        self.state.lock().await.tracked.insert(fact.to_string());
        Ok(())
    }
}
