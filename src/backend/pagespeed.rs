//! Remote fallback backend: Google PageSpeed Insights.
//!
//! One host, two capabilities: the analysis call requests the four category
//! params, the screenshot call requests screenshot inclusion and digs the
//! image out of whichever embedded location the API populated.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::backend::{raw_from_lighthouse, AnalysisBackend, BackendError, ScreenshotBackend};
use crate::config::CATEGORIES;
use crate::report::RawAnalysisResult;

pub struct PageSpeedBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PageSpeedBackend {
    /// Without an API key the calls still proceed, unauthenticated and
    /// rate-limited by Google.
    pub fn new(client: reqwest::Client, endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    async fn fetch(&self, query: &[(&str, &str)]) -> Result<Value, BackendError> {
        let mut request = self.client.get(&self.endpoint).query(query);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Payload(e.to_string()))
    }
}

#[async_trait]
impl AnalysisBackend for PageSpeedBackend {
    fn name(&self) -> &'static str {
        "pagespeed"
    }

    async fn analyze(&self, url: &Url) -> Result<RawAnalysisResult, BackendError> {
        let mut query: Vec<(&str, &str)> = vec![("url", url.as_str())];
        for category in CATEGORIES {
            query.push(("category", category));
        }

        let body = self.fetch(&query).await?;
        let lighthouse = body
            .get("lighthouseResult")
            .ok_or_else(|| BackendError::Payload("missing lighthouseResult".to_string()))?;

        Ok(raw_from_lighthouse(lighthouse))
    }
}

#[async_trait]
impl ScreenshotBackend for PageSpeedBackend {
    fn name(&self) -> &'static str {
        "pagespeed"
    }

    async fn capture(&self, url: &Url) -> Result<Option<String>, BackendError> {
        let body = self
            .fetch(&[("url", url.as_str()), ("screenshot", "true")])
            .await?;

        Ok(extract_screenshot(&body).map(ensure_data_uri))
    }
}

/// Pull an embedded screenshot out of a PageSpeed response, checking the
/// possible locations in priority order: full-page screenshot, the
/// final-screenshot audit, then the last frame of the thumbnail filmstrip.
/// `None` means the API answered without any image (a soft miss).
fn extract_screenshot(body: &Value) -> Option<String> {
    let lighthouse = body.get("lighthouseResult")?;

    if let Some(data) = lighthouse
        .pointer("/fullPageScreenshot/screenshot/data")
        .and_then(Value::as_str)
    {
        return Some(data.to_string());
    }

    if let Some(data) = lighthouse
        .pointer("/audits/final-screenshot/details/data")
        .and_then(Value::as_str)
    {
        return Some(data.to_string());
    }

    lighthouse
        .pointer("/audits/screenshot-thumbnails/details/items")
        .and_then(Value::as_array)
        .and_then(|items| items.last())
        .and_then(|frame| frame.get("data"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// PageSpeed sometimes returns bare base64 and sometimes a full data URI.
fn ensure_data_uri(data: String) -> String {
    if data.starts_with("data:") {
        data
    } else {
        format!("data:image/jpeg;base64,{data}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_page_screenshot_preferred() {
        let body = json!({
            "lighthouseResult": {
                "fullPageScreenshot": { "screenshot": { "data": "data:image/webp;base64,AAA" } },
                "audits": {
                    "final-screenshot": { "details": { "data": "data:image/jpeg;base64,BBB" } }
                }
            }
        });

        assert_eq!(
            extract_screenshot(&body).as_deref(),
            Some("data:image/webp;base64,AAA")
        );
    }

    #[test]
    fn test_final_screenshot_audit_is_second_choice() {
        let body = json!({
            "lighthouseResult": {
                "audits": {
                    "final-screenshot": { "details": { "data": "data:image/jpeg;base64,BBB" } },
                    "screenshot-thumbnails": {
                        "details": { "items": [ { "data": "data:image/jpeg;base64,CCC" } ] }
                    }
                }
            }
        });

        assert_eq!(
            extract_screenshot(&body).as_deref(),
            Some("data:image/jpeg;base64,BBB")
        );
    }

    #[test]
    fn test_last_filmstrip_frame_is_final_fallback() {
        let body = json!({
            "lighthouseResult": {
                "audits": {
                    "screenshot-thumbnails": {
                        "details": {
                            "items": [
                                { "data": "data:image/jpeg;base64,first" },
                                { "data": "data:image/jpeg;base64,last" }
                            ]
                        }
                    }
                }
            }
        });

        assert_eq!(
            extract_screenshot(&body).as_deref(),
            Some("data:image/jpeg;base64,last")
        );
    }

    #[test]
    fn test_no_embedded_image_is_soft_miss() {
        let body = json!({ "lighthouseResult": { "audits": {} } });
        assert_eq!(extract_screenshot(&body), None);
    }

    #[test]
    fn test_missing_lighthouse_result_is_soft_miss() {
        assert_eq!(extract_screenshot(&json!({})), None);
    }

    #[test]
    fn test_bare_base64_gets_data_uri_prefix() {
        assert_eq!(
            ensure_data_uri("AAAA".to_string()),
            "data:image/jpeg;base64,AAAA"
        );
    }

    #[test]
    fn test_existing_data_uri_left_untouched() {
        assert_eq!(
            ensure_data_uri("data:image/png;base64,AAAA".to_string()),
            "data:image/png;base64,AAAA"
        );
    }
}
