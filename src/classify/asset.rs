//! NFT-like asset classification.
//!
//! Decision order, first match wins: approved package, blocked package,
//! metadata keywords, image model, default. The approved list is always
//! consulted before the blocked list.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::image::{ImageClassifier, ImageLabel};
use super::Classify;
use crate::config::ClassifierConfig;
use crate::errors::Result;
use crate::rules::RuleTables;
use crate::types::{AssetItem, Classification, ClassificationStatus};

pub struct AssetClassifier {
    rules: Arc<RuleTables>,
    config: ClassifierConfig,
    image: Option<Arc<dyn ImageClassifier>>,
}

impl AssetClassifier {
    pub fn new(rules: Arc<RuleTables>, config: ClassifierConfig) -> Self {
        Self {
            rules,
            config,
            image: None,
        }
    }

    /// Attaches the image-model collaborator consulted at step 4.
    pub fn with_image_classifier(mut self, image: Arc<dyn ImageClassifier>) -> Self {
        self.image = Some(image);
        self
    }

    /// Produces exactly one verdict for the asset. Failures of the image
    /// model degrade to the default verdict for this asset only.
    pub async fn classify(&self, asset: &AssetItem) -> Classification {
        // 1. Approved list first; it wins regardless of metadata content.
        if self.rules.matches_approved_package(&asset.package_id) {
            return Classification::new(ClassificationStatus::Legit, 1.0, "Verified package");
        }

        // 2. Blocked list.
        if self.rules.matches_blocked_package(&asset.package_id) {
            return Classification::new(ClassificationStatus::Scam, 1.0, "Known scam package");
        }

        // 3. Phishing language in the metadata.
        let combined = format!("{} {}", asset.name, asset.description);
        if let Some(keyword) = self.rules.keyword_hit(&combined) {
            debug!(object_id = %asset.object_id, keyword, "scam keyword matched");
            return Classification::new(
                ClassificationStatus::Scam,
                self.config.keyword_confidence,
                "Suspicious keywords detected",
            );
        }

        // 4. Image model, when an image reference exists.
        if !asset.image_url.is_empty() {
            if let Some(verdict) = self.consult_image_model(asset).await {
                return verdict;
            }
        }

        // 5. No strong signal either way.
        Classification::new(
            ClassificationStatus::Dubious,
            self.config.default_confidence,
            "Unverified - review manually",
        )
    }

    /// Returns a verdict only when the model is confident past the accept
    /// threshold; anything else (weak signal, error, timeout) falls through.
    async fn consult_image_model(&self, asset: &AssetItem) -> Option<Classification> {
        let image = self.image.as_ref()?;
        let call = image.classify_image(&asset.image_url);
        match timeout(self.config.ml_timeout(), call).await {
            Ok(Ok(verdict)) => {
                if verdict.likelihood > self.config.ml_accept_threshold {
                    match verdict.label {
                        ImageLabel::Scam => Some(Classification::new(
                            ClassificationStatus::Scam,
                            verdict.likelihood,
                            "ML model detected scam patterns",
                        )),
                        ImageLabel::Legitimate => Some(Classification::new(
                            ClassificationStatus::Legit,
                            verdict.likelihood,
                            "ML model verified as legitimate",
                        )),
                    }
                } else {
                    None
                }
            }
            Ok(Err(err)) => {
                warn!(object_id = %asset.object_id, error = %err, "image classification failed");
                None
            }
            Err(_) => {
                warn!(object_id = %asset.object_id, "image classification timed out");
                None
            }
        }
    }
}

#[async_trait]
impl Classify<AssetItem> for AssetClassifier {
    async fn classify(&self, item: &AssetItem) -> Result<Classification> {
        Ok(AssetClassifier::classify(self, item).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::image::ImageVerdict;
    use crate::errors::SweepError;

    fn asset(package_id: &str, name: &str, description: &str, image_url: &str) -> AssetItem {
        AssetItem {
            object_id: "0xobj".to_string(),
            object_type: format!("{}::nft::Nft", package_id),
            package_id: package_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            hidden: false,
            selected: false,
        }
    }

    fn classifier() -> AssetClassifier {
        AssetClassifier::new(Arc::new(RuleTables::default()), ClassifierConfig::default())
    }

    struct FixedVerdict(ImageVerdict);

    #[async_trait]
    impl ImageClassifier for FixedVerdict {
        async fn classify_image(&self, _image_url: &str) -> Result<ImageVerdict> {
            Ok(self.0)
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ImageClassifier for FailingModel {
        async fn classify_image(&self, _image_url: &str) -> Result<ImageVerdict> {
            Err(SweepError::ImageClassification("service down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_approved_package_wins_over_keywords() {
        let verdict = classifier()
            .classify(&asset("0x2", "Claim your free airdrop now", "", ""))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Legit);
        assert_eq!(verdict.confidence, 1.0);
        assert_eq!(verdict.reason, "Verified package");
    }

    #[tokio::test]
    async fn test_blocked_package() {
        let rules = RuleTables {
            blocked_packages: vec!["0xbad".to_string()],
            ..Default::default()
        };
        let classifier = AssetClassifier::new(Arc::new(rules), ClassifierConfig::default());

        let verdict = classifier
            .classify(&asset("0xbad123", "Nice art", "totally fine", ""))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Scam);
        assert_eq!(verdict.confidence, 1.0);
        assert_eq!(verdict.reason, "Known scam package");
    }

    #[tokio::test]
    async fn test_scam_keywords_in_metadata() {
        let verdict = classifier()
            .classify(&asset("0xdead", "Claim your free airdrop now", "", ""))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Scam);
        assert_eq!(verdict.confidence, 0.85);
        assert_eq!(verdict.reason, "Suspicious keywords detected");
    }

    #[tokio::test]
    async fn test_image_model_confident_scam() {
        let model = FixedVerdict(ImageVerdict {
            label: ImageLabel::Scam,
            likelihood: 0.91,
        });
        let classifier = classifier().with_image_classifier(Arc::new(model));

        let verdict = classifier
            .classify(&asset("0xdead", "Art", "A picture", "https://img/1.png"))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Scam);
        assert_eq!(verdict.confidence, 0.91);
        assert_eq!(verdict.reason, "ML model detected scam patterns");
    }

    #[tokio::test]
    async fn test_image_model_confident_legit() {
        let model = FixedVerdict(ImageVerdict {
            label: ImageLabel::Legitimate,
            likelihood: 0.88,
        });
        let classifier = classifier().with_image_classifier(Arc::new(model));

        let verdict = classifier
            .classify(&asset("0xdead", "Art", "A picture", "https://img/1.png"))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Legit);
        assert_eq!(verdict.reason, "ML model verified as legitimate");
    }

    #[tokio::test]
    async fn test_weak_image_signal_falls_through() {
        let model = FixedVerdict(ImageVerdict {
            label: ImageLabel::Scam,
            likelihood: 0.5,
        });
        let classifier = classifier().with_image_classifier(Arc::new(model));

        let verdict = classifier
            .classify(&asset("0xdead", "Art", "A picture", "https://img/1.png"))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Dubious);
        assert_eq!(verdict.reason, "Unverified - review manually");
    }

    #[tokio::test]
    async fn test_image_model_failure_degrades_to_default() {
        let classifier = classifier().with_image_classifier(Arc::new(FailingModel));

        let verdict = classifier
            .classify(&asset("0xdead", "Art", "A picture", "https://img/1.png"))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Dubious);
        assert_eq!(verdict.confidence, 0.5);
    }

    #[tokio::test]
    async fn test_no_image_skips_the_model() {
        let verdict = classifier()
            .classify(&asset("0xdead", "Art", "A picture", ""))
            .await;
        assert_eq!(verdict.status, ClassificationStatus::Dubious);
    }
}
