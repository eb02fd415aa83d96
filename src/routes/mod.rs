pub mod analyze;
pub mod health;
pub mod screenshot;

use serde::Deserialize;

/// Shared request body for the analyze and screenshot operations.
/// `default` keeps a missing `url` field in the validator's hands (it maps
/// to "URL is required") instead of a deserialization rejection.
#[derive(Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: String,
}
