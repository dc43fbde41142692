//! Sentence classification against the hosted distortion classifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::build_http_client;
use crate::api::DistortionClassification;
use crate::config::ClassifierSettings;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("classifier returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("classifier response malformed: {0}")]
    Decode(String),
}

/// Classifies sentences into distortion categories.
///
/// Implementations must be `Send + Sync`; one instance is shared by all
/// requests.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify each input; results follow the input order.
    async fn classify(
        &self,
        inputs: &[String],
    ) -> Result<Vec<DistortionClassification>, ClassifierError>;
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    model: &'a str,
    inputs: &'a [String],
}

#[derive(Deserialize)]
struct ClassifyResponse {
    classifications: Vec<Classification>,
}

#[derive(Deserialize)]
struct Classification {
    input: String,
    #[serde(default)]
    prediction: Option<String>,
    #[serde(default)]
    predictions: Vec<String>,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    confidences: Vec<f64>,
}

impl Classification {
    fn into_domain(self) -> Result<DistortionClassification, ClassifierError> {
        let label = self
            .prediction
            .or_else(|| self.predictions.into_iter().next())
            .ok_or_else(|| {
                ClassifierError::Decode(format!("no prediction for input '{}'", self.input))
            })?;
        let confidence = self
            .confidence
            .or_else(|| self.confidences.first().copied())
            .ok_or_else(|| {
                ClassifierError::Decode(format!("no confidence for input '{}'", self.input))
            })?;

        Ok(DistortionClassification {
            sentence: self.input,
            predicted_distortion: label,
            confidence,
        })
    }
}

/// Decode a classify response body.
pub fn parse_classify_response(
    body: &str,
) -> Result<Vec<DistortionClassification>, ClassifierError> {
    let response: ClassifyResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::Decode(e.to_string()))?;
    response
        .classifications
        .into_iter()
        .map(Classification::into_domain)
        .collect()
}

/// Cohere `classify` client bound to a fine-tuned model.
pub struct CohereClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl CohereClassifier {
    pub fn new(
        settings: &ClassifierSettings,
        api_key: impl Into<String>,
    ) -> Result<Self, ClassifierError> {
        Ok(Self {
            client: build_http_client(settings.timeout_secs)?,
            endpoint: format!("{}/v1/classify", settings.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: settings.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Classifier for CohereClassifier {
    async fn classify(
        &self,
        inputs: &[String],
    ) -> Result<Vec<DistortionClassification>, ClassifierError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ClassifyRequest {
                model: &self.model,
                inputs,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        parse_classify_response(&body)
    }
}
