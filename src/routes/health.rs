use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backends: BackendsInfo,
}

#[derive(Serialize)]
pub struct BackendsInfo {
    pub engine_url: String,
    pub pagespeed_key_configured: bool,
    pub local_capture: bool,
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backends: BackendsInfo {
            engine_url: state.config.engine_url.clone(),
            pagespeed_key_configured: state.config.pagespeed_api_key.is_some(),
            local_capture: state.config.local_capture,
        },
    })
}
