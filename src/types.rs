//! Core domain types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of holdings the scanner works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Non-fungible (or semi-fungible) on-chain object.
    Asset,
    /// Fungible coin balance identified by its coin type.
    Token,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Asset => "asset",
            ItemKind::Token => "token",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trust verdict for a single holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStatus {
    Legit,
    Dubious,
    Scam,
}

impl ClassificationStatus {
    /// Short display label, as shown on item cards.
    pub fn label(&self) -> &'static str {
        match self {
            ClassificationStatus::Legit => "LEGIT",
            ClassificationStatus::Dubious => "DUBIOUS",
            ClassificationStatus::Scam => "SCAM",
        }
    }
}

/// Classification verdict: status, confidence in [0, 1], and a short
/// human-readable reason. Immutable once produced for a scan cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub status: ClassificationStatus,
    pub confidence: f64,
    pub reason: String,
}

impl Classification {
    pub fn new(
        status: ClassificationStatus,
        confidence: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status,
            confidence,
            reason: reason.into(),
        }
    }
}

/// An owned NFT-like object, materialized fresh on every wallet scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetItem {
    /// Opaque on-chain object id.
    pub object_id: String,
    /// Fully-qualified Move type of the object.
    pub object_type: String,
    /// Publishing package id, derived from the type prefix.
    pub package_id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Merged in from the preference store at materialization time.
    pub hidden: bool,
    /// Transient UI selection state, never persisted.
    #[serde(default)]
    pub selected: bool,
}

/// An owned fungible coin balance. Zero balances are filtered out during
/// materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenItem {
    /// Fully-qualified coin type, also the item identity.
    pub coin_type: String,
    /// Publishing package id, derived from the coin type prefix.
    pub package_id: String,
    pub symbol: String,
    pub name: String,
    /// Raw integer balance in base units.
    pub raw_balance: u128,
    pub decimals: u8,
    /// Human-readable decimal rendering of `raw_balance`.
    pub formatted_balance: String,
    pub icon_url: Option<String>,
    pub hidden: bool,
    #[serde(default)]
    pub selected: bool,
}

/// Anything with a stable identity usable as a classification-map key.
pub trait Identified {
    fn identity(&self) -> &str;
}

impl Identified for AssetItem {
    fn identity(&self) -> &str {
        &self.object_id
    }
}

impl Identified for TokenItem {
    fn identity(&self) -> &str {
        &self.coin_type
    }
}
