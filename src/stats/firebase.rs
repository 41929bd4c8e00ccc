//! Firebase Realtime Database counter backend.
//!
//! Counters live under `stats`, tracking markers under `wallets/<key>`.
//! Atomicity of `transact_increment` comes from the RTDB ETag protocol: read
//! the node with `X-Firebase-ETag`, apply the delta locally, then write back
//! with `if-match`. A 412 means another writer got there first and the
//! read-apply-write cycle is retried.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::ETAG;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use super::{CounterDelta, CounterSnapshot, CounterStore};
use crate::errors::{Result, SweepError};

const STATS_PATH: &str = "stats";
const WALLETS_PATH: &str = "wallets";
const CAS_RETRY_LIMIT: usize = 5;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct FirebaseStatsClient {
    client: Client,
    base_url: String,
}

impl FirebaseStatsClient {
    /// `base_url` is the database root, e.g.
    /// `https://my-project-default-rtdb.firebaseio.com`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads the database URL from `SWEEP_FIREBASE_URL`.
    pub fn from_env() -> Option<Self> {
        std::env::var("SWEEP_FIREBASE_URL").ok().map(Self::new)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}.json", self.base_url, path)
    }

    /// RTDB keys must not contain `. # $ [ ] /`.
    fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '#' | '$' | '[' | ']' | '/' => '_',
                other => other,
            })
            .collect()
    }

    async fn read_with_etag(&self) -> Result<(Option<CounterSnapshot>, String)> {
        let response = self
            .client
            .get(self.url(STATS_PATH))
            .header("X-Firebase-ETag", "true")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SweepError::CounterStore(format!(
                "stats read returned {}",
                response.status()
            )));
        }
        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let snapshot: Option<CounterSnapshot> = response.json().await?;
        Ok((snapshot, etag))
    }
}

#[async_trait]
impl CounterStore for FirebaseStatsClient {
    async fn read_counters(&self) -> Result<CounterSnapshot> {
        let response = self.client.get(self.url(STATS_PATH)).send().await?;
        if !response.status().is_success() {
            return Err(SweepError::CounterStore(format!(
                "stats read returned {}",
                response.status()
            )));
        }
        let snapshot: Option<CounterSnapshot> = response.json().await?;
        match snapshot {
            Some(snapshot) => Ok(snapshot),
            None => {
                // First reader seeds the node; losing a race here is harmless.
                let seed = CounterSnapshot::seed();
                if let Err(err) = self
                    .client
                    .put(self.url(STATS_PATH))
                    .json(&seed)
                    .send()
                    .await
                {
                    warn!(error = %err, "failed to seed stats node");
                }
                Ok(seed)
            }
        }
    }

    async fn transact_increment(&self, delta: CounterDelta) -> Result<()> {
        for attempt in 0..CAS_RETRY_LIMIT {
            let (snapshot, etag) = self.read_with_etag().await?;
            let mut next = snapshot.unwrap_or_else(CounterSnapshot::seed);
            next.apply(&delta);

            let response = self
                .client
                .put(self.url(STATS_PATH))
                .header("if-match", &etag)
                .json(&next)
                .send()
                .await?;

            if response.status() == StatusCode::PRECONDITION_FAILED {
                debug!(attempt, "stats write contended, retrying");
                continue;
            }
            if !response.status().is_success() {
                return Err(SweepError::CounterStore(format!(
                    "stats write returned {}",
                    response.status()
                )));
            }
            return Ok(());
        }
        Err(SweepError::CounterStore(format!(
            "stats write still contended after {} attempts",
            CAS_RETRY_LIMIT
        )))
    }

    async fn is_tracked(&self, fact: &str) -> Result<bool> {
        let path = format!("{}/{}", WALLETS_PATH, Self::sanitize_key(fact));
        let response = self.client.get(self.url(&path)).send().await?;
        if !response.status().is_success() {
            return Err(SweepError::CounterStore(format!(
                "marker read returned {}",
                response.status()
            )));
        }
        let value: serde_json::Value = response.json().await?;
        Ok(!value.is_null())
    }

    async fn mark_tracked(&self, fact: &str) -> Result<()> {
        let path = format!("{}/{}", WALLETS_PATH, Self::sanitize_key(fact));
        let marker = serde_json::json!({
            "fact": fact,
            "tracked_at": Utc::now().to_rfc3339(),
        });
        let response = self
            .client
            .put(self.url(&path))
            .json(&marker)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SweepError::CounterStore(format!(
                "marker write returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
