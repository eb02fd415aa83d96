use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::AnalyzerError;
use crate::routes::UrlRequest;
use crate::state::SharedState;
use crate::validate;

#[derive(Serialize)]
pub struct ScreenshotResponse {
    pub screenshot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/screenshot — screenshot chain only. A missing image is a 200
/// with `screenshot: null`, never an error status.
pub async fn screenshot(
    State(state): State<SharedState>,
    Json(body): Json<UrlRequest>,
) -> Result<Json<ScreenshotResponse>, AnalyzerError> {
    let url = validate::validate_url(&body.url)?;
    let (screenshot, _attempts) = state.orchestrator.screenshot(&url).await;

    let response = match screenshot {
        Some(image) => ScreenshotResponse {
            screenshot: Some(image),
            message: None,
        },
        None => ScreenshotResponse {
            screenshot: None,
            message: Some("Screenshot not available".to_string()),
        },
    };

    Ok(Json(response))
}
