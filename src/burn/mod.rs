//! Burning unwanted items.
//!
//! Each burn is one user-confirmed signed transaction, so selections are
//! processed strictly sequentially. A failure on one item is logged and the
//! loop continues: partial success is expected, and only the identities that
//! actually burned are returned so the caller updates its working set for
//! exactly those.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::classify::BatchProgress;
use crate::errors::Result;

/// Transaction-signing collaborator. One call per burned item.
#[async_trait]
pub trait BurnExecutor: Send + Sync {
    async fn burn(&self, identity: &str) -> Result<()>;
}

/// Sequential best-effort bulk burn.
pub struct BulkBurner {
    executor: Arc<dyn BurnExecutor>,
}

impl BulkBurner {
    pub fn new(executor: Arc<dyn BurnExecutor>) -> Self {
        Self { executor }
    }

    /// Burns the selection one item at a time, reporting progress after each
    /// attempt. Returns the identities that succeeded, in burn order.
    pub async fn burn_all(
        &self,
        identities: &[String],
        mut on_progress: impl FnMut(BatchProgress),
    ) -> Vec<String> {
        let total = identities.len();
        let mut burned = Vec::new();

        for (index, identity) in identities.iter().enumerate() {
            match self.executor.burn(identity).await {
                Ok(()) => burned.push(identity.clone()),
                Err(err) => {
                    warn!(identity = %identity, error = %err, "burn failed, continuing");
                }
            }
            on_progress(BatchProgress {
                completed: index + 1,
                total,
            });
        }

        info!(requested = total, burned = burned.len(), "bulk burn finished");
        burned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SweepError;
    use parking_lot::Mutex;

    /// Executor that rejects configured identities.
    struct Flaky {
        rejects: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BurnExecutor for Flaky {
        async fn burn(&self, identity: &str) -> Result<()> {
            self.calls.lock().push(identity.to_string());
            if self.rejects.iter().any(|id| id == identity) {
                Err(SweepError::Burn("signer rejected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn test_partial_failure_returns_only_succeeded() {
        let executor = Arc::new(Flaky {
            rejects: vec!["0xb".to_string()],
            calls: Mutex::new(Vec::new()),
        });
        let burner = BulkBurner::new(executor.clone());

        let selection: Vec<String> =
            ["0xa", "0xb", "0xc"].iter().map(|s| s.to_string()).collect();
        let burned = burner.burn_all(&selection, |_| {}).await;

        assert_eq!(burned, vec!["0xa".to_string(), "0xc".to_string()]);
        // Every item was still attempted, in order.
        assert_eq!(executor.calls.lock().as_slice(), &selection[..]);
    }

    #[tokio::test]
    async fn test_progress_reported_per_attempt() {
        let executor = Arc::new(Flaky {
            rejects: vec!["0xa".to_string()],
            calls: Mutex::new(Vec::new()),
        });
        let burner = BulkBurner::new(executor);

        let selection: Vec<String> = ["0xa", "0xb"].iter().map(|s| s.to_string()).collect();
        let mut seen = Vec::new();
        burner
            .burn_all(&selection, |p| seen.push((p.completed, p.total)))
            .await;

        assert_eq!(seen, vec![(1, 2), (2, 2)]);
    }

    #[tokio::test]
    async fn test_empty_selection() {
        let executor = Arc::new(Flaky {
            rejects: vec![],
            calls: Mutex::new(Vec::new()),
        });
        let burned = BulkBurner::new(executor).burn_all(&[], |_| {}).await;
        assert!(burned.is_empty());
    }
}
