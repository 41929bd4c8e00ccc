//! Wallet hygiene core for Sui.
//!
//! Scans a wallet's holdings, assigns each asset and token a rule-based
//! trust verdict (optionally assisted by an external image model), keeps
//! hide/unhide state and a capped action log durable across reloads, and
//! contributes idempotent one-time increments to shared aggregate counters.
//! This crate is the decision and bookkeeping layer only; wallet connection,
//! chain queries, transaction signing, and rendering belong to its
//! collaborators behind the trait seams in [`scan`], [`burn`], [`classify`],
//! and [`stats`].

pub mod burn;
pub mod classify;
pub mod config;
pub mod errors;
pub mod rules;
pub mod scan;
pub mod service;
pub mod stats;
pub mod store;
pub mod types;

pub use config::ClassifierConfig;
pub use errors::{Result, SweepError};
pub use rules::RuleTables;
pub use service::Sweeper;
pub use types::{
    AssetItem, Classification, ClassificationStatus, ItemKind, TokenItem,
};
