//! Client for the hosted categorical sentiment model.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use screenpulse_common::SentimentLabel;

use crate::error::{ClassifyError, Result};

/// One prediction from the model service.
#[derive(Debug, Clone, Deserialize)]
pub struct Classification {
    pub label: SentimentLabel,
    /// Model confidence in [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

pub struct ModelClassifier {
    client: reqwest::Client,
    base_url: String,
}

impl ModelClassifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Classify one text. The model always answers with exactly one of
    /// positive/negative/neutral plus its confidence.
    pub async fn classify(&self, text: &str) -> Result<Classification> {
        let url = format!("{}/v1/classify", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&ClassifyRequest { text })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClassifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let prediction: Classification = resp.json().await?;
        tracing::debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            "model: classified text"
        );

        Ok(prediction)
    }
}
