//! Image-model collaborator seam.
//!
//! The asset classifier optionally consults an external image-based
//! scam-detection service. The call is asynchronous, may fail or time out,
//! and its failure must never abort a classification pass.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::{Result, SweepError};

/// Verdict label returned by the image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLabel {
    Scam,
    Legitimate,
}

/// Image-model verdict with its likelihood in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageVerdict {
    pub label: ImageLabel,
    pub likelihood: f64,
}

#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify_image(&self, image_url: &str) -> Result<ImageVerdict>;
}

/// HTTP client for a hosted scam-detector service.
pub struct HttpImageClassifier {
    client: Client,
    endpoint: String,
}

/// Service response. `ham` is the detector's label for legitimate imagery.
#[derive(Debug, Deserialize)]
struct DetectorResponse {
    classification: String,
    #[serde(default)]
    scam_likelihood: f64,
    #[serde(default)]
    ham_likelihood: f64,
}

impl HttpImageClassifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Reads the service endpoint from `SWEEP_IMAGE_CLASSIFIER_URL`.
    pub fn from_env() -> Option<Self> {
        std::env::var("SWEEP_IMAGE_CLASSIFIER_URL")
            .ok()
            .map(Self::new)
    }
}

#[async_trait]
impl ImageClassifier for HttpImageClassifier {
    async fn classify_image(&self, image_url: &str) -> Result<ImageVerdict> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "image_url": image_url }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SweepError::ImageClassification(format!(
                "detector returned {}",
                response.status()
            )));
        }

        let body: DetectorResponse = response.json().await?;
        match body.classification.as_str() {
            "scam" => Ok(ImageVerdict {
                label: ImageLabel::Scam,
                likelihood: body.scam_likelihood,
            }),
            "ham" | "legitimate" => Ok(ImageVerdict {
                label: ImageLabel::Legitimate,
                likelihood: body.ham_likelihood,
            }),
            other => Err(SweepError::ImageClassification(format!(
                "unknown label '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_response_parsing() {
        let body: DetectorResponse = serde_json::from_str(
            r#"{"classification": "scam", "scam_likelihood": 0.92}"#,
        )
        .unwrap();
        assert_eq!(body.classification, "scam");
        assert_eq!(body.scam_likelihood, 0.92);
        assert_eq!(body.ham_likelihood, 0.0);
    }
}
