//! Crate-wide error type.

use thiserror::Error;

/// Errors produced by the sweep core.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Local persisted store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Shared counter backend failed or stayed contended.
    #[error("Counter store error: {0}")]
    CounterStore(String),

    /// Chain query collaborator failed.
    #[error("Chain query error: {0}")]
    ChainQuery(String),

    /// Image classification collaborator failed.
    #[error("Image classification error: {0}")]
    ImageClassification(String),

    /// A burn transaction was rejected or failed to execute.
    #[error("Burn failed: {0}")]
    Burn(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid caller input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SweepError {
    fn from(err: reqwest::Error) -> Self {
        SweepError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
