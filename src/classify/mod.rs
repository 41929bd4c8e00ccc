//! Trust classification.
//!
//! Two rule-driven classifiers (assets and tokens), the optional image-model
//! seam the asset path consults, and the sequential batch orchestrator that
//! drives whole-collection passes.

mod asset;
mod batch;
mod image;
mod token;

pub use asset::AssetClassifier;
pub use batch::{BatchClassifier, BatchProgress, BatchReport};
pub use image::{HttpImageClassifier, ImageClassifier, ImageLabel, ImageVerdict};
pub use token::TokenClassifier;

use async_trait::async_trait;

use crate::errors::Result;
use crate::types::Classification;

/// Classification seam the batch orchestrator drives items through.
#[async_trait]
pub trait Classify<T>: Send + Sync {
    async fn classify(&self, item: &T) -> Result<Classification>;
}
