//! Backend capability interfaces and their implementations.
//!
//! Each backend is one concrete source of analysis or screenshot data. The
//! orchestrator only ever sees the two traits; failure causes below are for
//! logging, not for routing decisions — its only move is "try the next one".

pub mod capture;
pub mod engine;
pub mod pagespeed;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::report::RawAnalysisResult;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("capture failed: {0}")]
    Capture(String),
}

/// One source of raw category scores and audit display values.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn analyze(&self, url: &Url) -> Result<RawAnalysisResult, BackendError>;
}

/// One source of rendered screenshots. `Ok(None)` is a soft miss: the
/// backend answered but had no image, which is not an error.
#[async_trait]
pub trait ScreenshotBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn capture(&self, url: &Url) -> Result<Option<String>, BackendError>;
}

/// Extract a `RawAnalysisResult` from a Lighthouse-shaped JSON object:
/// `categories.<name>.score` and `audits.<id>.displayValue`. Fields that are
/// missing or of the wrong type are simply skipped; the normalizer fills the
/// gaps later.
pub(crate) fn raw_from_lighthouse(value: &Value) -> RawAnalysisResult {
    let mut raw = RawAnalysisResult::default();

    if let Some(categories) = value.get("categories").and_then(Value::as_object) {
        for (name, category) in categories {
            if let Some(score) = category.get("score").and_then(Value::as_f64) {
                raw.categories.insert(name.clone(), score);
            }
        }
    }

    if let Some(audits) = value.get("audits").and_then(Value::as_object) {
        for (id, audit) in audits {
            if let Some(display) = audit.get("displayValue").and_then(Value::as_str) {
                raw.audits.insert(id.clone(), display.to_string());
            }
        }
    }

    raw
}
