use url::Url;

use crate::error::AnalyzerError;

/// Validate a raw URL string before any backend is contacted.
///
/// Accepts only absolute http/https URLs. Missing and malformed input map to
/// the same error class, distinguished only by message. No network access.
pub fn validate_url(raw: &str) -> Result<Url, AnalyzerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AnalyzerError::missing_url());
    }

    let url = Url::parse(raw).map_err(|_| AnalyzerError::invalid_url())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(AnalyzerError::invalid_url()),
    }
}
