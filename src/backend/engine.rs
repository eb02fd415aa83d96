//! Primary analysis backend: the loopback Lighthouse engine.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::backend::{raw_from_lighthouse, AnalysisBackend, BackendError};
use crate::report::RawAnalysisResult;

/// Talks to the locally hosted Lighthouse engine over one POST per analysis.
/// The engine runs the page load itself and answers with native Lighthouse
/// JSON (`categories.*.score`, `audits.*.displayValue`).
pub struct EngineBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl EngineBackend {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl AnalysisBackend for EngineBackend {
    fn name(&self) -> &'static str {
        "lighthouse-engine"
    }

    async fn analyze(&self, url: &Url) -> Result<RawAnalysisResult, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "url": url.as_str() }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Payload(e.to_string()))?;

        Ok(raw_from_lighthouse(&body))
    }
}
