//! Composition root.
//!
//! `Sweeper` wires the collaborators and core components together and exposes
//! the flows the UI drives: connect, scan, classify, hide/unhide/keep, and
//! burn. Counter-store failures are logged here and never surfaced; the
//! aggregate statistics are cosmetic and hide/burn correctness does not
//! depend on them.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::burn::{BulkBurner, BurnExecutor};
use crate::classify::{
    AssetClassifier, BatchClassifier, BatchReport, ImageClassifier, TokenClassifier,
};
use crate::config::ClassifierConfig;
use crate::errors::Result;
use crate::rules::RuleTables;
use crate::scan::{self, ChainQuery};
use crate::stats::{CounterSnapshot, CounterStore, StatsTracker};
use crate::store::{ActionKind, LocalStore, PreferenceStore};
use crate::types::{AssetItem, Classification, ItemKind, TokenItem};

pub struct Sweeper {
    chain: Arc<dyn ChainQuery>,
    prefs: PreferenceStore,
    tracker: StatsTracker,
    asset_classifier: AssetClassifier,
    token_classifier: TokenClassifier,
    asset_batch: BatchClassifier<AssetItem>,
    token_batch: BatchClassifier<TokenItem>,
    burner: BulkBurner,
}

impl Sweeper {
    pub fn new(
        chain: Arc<dyn ChainQuery>,
        burn_executor: Arc<dyn BurnExecutor>,
        counters: Arc<dyn CounterStore>,
        local: Arc<dyn LocalStore>,
        rules: RuleTables,
        config: ClassifierConfig,
    ) -> Result<Self> {
        config.validate()?;
        let rules = Arc::new(rules);
        Ok(Self {
            chain,
            prefs: PreferenceStore::new(local),
            tracker: StatsTracker::new(counters),
            asset_classifier: AssetClassifier::new(rules.clone(), config.clone()),
            token_classifier: TokenClassifier::new(rules, config),
            asset_batch: BatchClassifier::new(),
            token_batch: BatchClassifier::new(),
            burner: BulkBurner::new(burn_executor),
        })
    }

    /// Attaches the image-model collaborator to the asset path.
    pub fn with_image_classifier(mut self, image: Arc<dyn ImageClassifier>) -> Self {
        self.asset_classifier = self.asset_classifier.with_image_classifier(image);
        self
    }

    /// Registers a wallet connection. Returns whether this wallet was new.
    pub async fn connect_wallet(&self, address: &str) -> bool {
        match self.tracker.track_connection(address).await {
            Ok(is_new) => is_new,
            Err(err) => {
                warn!(error = %err, "connection tracking unavailable");
                false
            }
        }
    }

    /// Fetches the wallet's current asset working set.
    pub async fn scan_assets(&self, address: &str) -> Result<Vec<AssetItem>> {
        scan::load_assets(self.chain.as_ref(), &self.prefs, address).await
    }

    /// Fetches the wallet's current token working set.
    pub async fn scan_tokens(&self, address: &str) -> Result<Vec<TokenItem>> {
        scan::load_tokens(self.chain.as_ref(), &self.prefs, address).await
    }

    /// Runs a full asset classification pass and contributes its tallies to
    /// the shared counters (first qualifying scan per wallet only). Returns
    /// `None` when a pass is already running.
    pub async fn classify_assets(
        &self,
        address: &str,
        assets: &[AssetItem],
    ) -> Option<BatchReport> {
        let report = self
            .asset_batch
            .run(assets, &self.asset_classifier, |p| {
                debug!(completed = p.completed, total = p.total, "asset classification progress");
            })
            .await?;
        if let Err(err) = self
            .tracker
            .track_scan(address, ItemKind::Asset, &report)
            .await
        {
            warn!(error = %err, "scan tracking unavailable");
        }
        Some(report)
    }

    /// Token-collection counterpart of [`Self::classify_assets`].
    pub async fn classify_tokens(
        &self,
        address: &str,
        tokens: &[TokenItem],
    ) -> Option<BatchReport> {
        let report = self
            .token_batch
            .run(tokens, &self.token_classifier, |p| {
                debug!(completed = p.completed, total = p.total, "token classification progress");
            })
            .await?;
        if let Err(err) = self
            .tracker
            .track_scan(address, ItemKind::Token, &report)
            .await
        {
            warn!(error = %err, "scan tracking unavailable");
        }
        Some(report)
    }

    /// Last published classification maps.
    pub fn asset_classifications(&self) -> HashMap<String, Classification> {
        self.asset_batch.results()
    }

    pub fn token_classifications(&self) -> HashMap<String, Classification> {
        self.token_batch.results()
    }

    /// Hides an item and records the action.
    pub fn hide(&self, kind: ItemKind, identity: &str) {
        self.prefs.hide(kind, identity);
        self.prefs.log_action(identity, kind, ActionKind::Hide);
    }

    /// Unhides an item and records the action.
    pub fn unhide(&self, kind: ItemKind, identity: &str) {
        self.prefs.unhide(kind, identity);
        self.prefs.log_action(identity, kind, ActionKind::Unhide);
    }

    /// Records an explicit "keep" decision.
    pub fn keep(&self, kind: ItemKind, identity: &str) {
        self.prefs.log_action(identity, kind, ActionKind::Keep);
    }

    /// Burns the selection sequentially and returns the identities that
    /// succeeded; the caller removes exactly those from its working set.
    pub async fn burn_selected(&self, kind: ItemKind, identities: &[String]) -> Vec<String> {
        let burned = self
            .burner
            .burn_all(identities, |p| {
                debug!(completed = p.completed, total = p.total, "burn progress");
            })
            .await;

        for identity in &burned {
            self.prefs.log_action(identity, kind, ActionKind::Burn);
        }
        if let Err(err) = self.tracker.track_burn(kind, burned.len()).await {
            warn!(error = %err, "burn tracking unavailable");
        }
        burned
    }

    /// Current global counters, for the statistics panel.
    pub async fn global_counters(&self) -> Result<CounterSnapshot> {
        self.tracker.counters().await
    }

    pub fn preferences(&self) -> &PreferenceStore {
        &self.prefs
    }
}
