use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to analyze website. Please try again later.")]
    AllBackendsExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AnalyzerError {
    pub fn missing_url() -> Self {
        AnalyzerError::InvalidInput("URL is required".to_string())
    }

    pub fn invalid_url() -> Self {
        AnalyzerError::InvalidInput("Invalid URL format".to_string())
    }
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalyzerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AnalyzerError::AllBackendsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
            AnalyzerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AnalyzerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Per-backend causes were already logged by the orchestrator; the
        // external body never carries internal endpoint details.
        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
