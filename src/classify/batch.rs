//! Whole-collection classification passes.
//!
//! Items are processed strictly sequentially: at most one external call is in
//! flight at a time and progress is deterministic and monotone. The shared
//! result map is only replaced after the entire batch completes, so readers
//! see either the previous complete map or the new one, never a mix. One
//! orchestrator instance serves one collection type; a run started while
//! another is in flight is ignored.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use parking_lot::RwLock;

use super::Classify;
use crate::types::{Classification, ClassificationStatus, Identified};

/// Progress after each classified item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
}

/// Tallies of a completed pass, consumed by the stats tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub legit: usize,
    pub dubious: usize,
    pub scam: usize,
}

impl BatchReport {
    fn tally(results: &HashMap<String, Classification>) -> Self {
        let mut report = Self {
            total: results.len(),
            ..Default::default()
        };
        for classification in results.values() {
            match classification.status {
                ClassificationStatus::Legit => report.legit += 1,
                ClassificationStatus::Dubious => report.dubious += 1,
                ClassificationStatus::Scam => report.scam += 1,
            }
        }
        report
    }
}

/// Sequential batch orchestrator for one collection type.
pub struct BatchClassifier<T> {
    results: RwLock<HashMap<String, Classification>>,
    running: AtomicBool,
    _kind: PhantomData<fn(T)>,
}

impl<T> Default for BatchClassifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BatchClassifier<T> {
    pub fn new() -> Self {
        Self {
            results: RwLock::new(HashMap::new()),
            running: AtomicBool::new(false),
            _kind: PhantomData,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The last fully published result map.
    pub fn results(&self) -> HashMap<String, Classification> {
        self.results.read().clone()
    }

    /// Verdict for one identity from the last published map.
    pub fn classification(&self, identity: &str) -> Option<Classification> {
        self.results.read().get(identity).cloned()
    }
}

impl<T: Identified + Send + Sync> BatchClassifier<T> {
    /// Classifies every item exactly once, in input order, invoking
    /// `on_progress` after each. Returns `None` if a run is already in
    /// flight (the call is ignored). A single item's failure is mapped to a
    /// dubious "Classification failed" verdict rather than aborting the
    /// batch. On completion the published map is replaced wholesale and the
    /// pass tallies are returned.
    pub async fn run(
        &self,
        items: &[T],
        classifier: &dyn Classify<T>,
        mut on_progress: impl FnMut(BatchProgress),
    ) -> Option<BatchReport> {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("classification already in flight, ignoring re-entrant run");
            return None;
        }

        let total = items.len();
        let mut results = HashMap::with_capacity(total);

        for (index, item) in items.iter().enumerate() {
            let classification = match classifier.classify(item).await {
                Ok(classification) => classification,
                Err(err) => {
                    warn!(identity = %item.identity(), error = %err, "item classification failed");
                    Classification::new(
                        ClassificationStatus::Dubious,
                        0.0,
                        "Classification failed",
                    )
                }
            };
            results.insert(item.identity().to_string(), classification);
            on_progress(BatchProgress {
                completed: index + 1,
                total,
            });
        }

        let report = BatchReport::tally(&results);
        *self.results.write() = results;
        self.running.store(false, Ordering::SeqCst);

        debug!(
            total = report.total,
            legit = report.legit,
            dubious = report.dubious,
            scam = report.scam,
            "classification pass complete"
        );
        Some(report)
    }
}
