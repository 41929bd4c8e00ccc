//! Classifier policy configuration.
//!
//! Confidence levels and the dust threshold are policy constants, not derived
//! values; they live here so deployments can tune them without touching
//! classifier logic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{Result, SweepError};

/// Tunable classification policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Confidence assigned when metadata contains a scam keyword.
    pub keyword_confidence: f64,

    /// Confidence assigned when a token impersonates a protected symbol.
    pub impersonation_confidence: f64,

    /// Confidence assigned to dust-amount holdings.
    pub dust_confidence: f64,

    /// Confidence assigned to the fall-through "unverified" verdict.
    pub default_confidence: f64,

    /// Minimum likelihood at which an image-model verdict is accepted.
    pub ml_accept_threshold: f64,

    /// Upper bound on a single image-classification call, in milliseconds.
    /// A timeout is treated as a failed call and the asset falls through to
    /// the default verdict.
    pub ml_timeout_ms: u64,

    /// Nonzero balances strictly below this are treated as dust.
    pub dust_threshold: Decimal,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            keyword_confidence: 0.85,
            impersonation_confidence: 0.95,
            dust_confidence: 0.7,
            default_confidence: 0.5,
            ml_accept_threshold: 0.7,
            ml_timeout_ms: 4000,
            dust_threshold: Decimal::new(1, 4), // 0.0001
        }
    }
}

impl ClassifierConfig {
    /// Checks that every confidence value is a proper probability and the
    /// dust threshold is positive.
    pub fn validate(&self) -> Result<()> {
        let confidences = [
            ("keyword_confidence", self.keyword_confidence),
            ("impersonation_confidence", self.impersonation_confidence),
            ("dust_confidence", self.dust_confidence),
            ("default_confidence", self.default_confidence),
            ("ml_accept_threshold", self.ml_accept_threshold),
        ];
        for (name, value) in confidences {
            if !(0.0..=1.0).contains(&value) {
                return Err(SweepError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.dust_threshold <= Decimal::ZERO {
            return Err(SweepError::Configuration(format!(
                "dust_threshold must be positive, got {}",
                self.dust_threshold
            )));
        }
        if self.ml_timeout_ms == 0 {
            return Err(SweepError::Configuration(
                "ml_timeout_ms must be nonzero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ml_timeout(&self) -> Duration {
        Duration::from_millis(self.ml_timeout_ms)
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
