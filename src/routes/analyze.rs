use axum::extract::State;
use axum::Json;

use crate::error::AnalyzerError;
use crate::report::AnalysisReport;
use crate::routes::UrlRequest;
use crate::state::SharedState;
use crate::validate;

/// POST /api/analyze — run the full analysis orchestration for one URL.
pub async fn analyze(
    State(state): State<SharedState>,
    Json(body): Json<UrlRequest>,
) -> Result<Json<AnalysisReport>, AnalyzerError> {
    let url = validate::validate_url(&body.url)?;
    let outcome = state.orchestrator.analyze(&url).await?;
    Ok(Json(outcome.report))
}
