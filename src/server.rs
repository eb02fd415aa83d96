use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(crate::routes::health::health))
        // Analysis + screenshots
        .route("/api/analyze", post(crate::routes::analyze::analyze))
        .route("/api/screenshot", post(crate::routes::screenshot::screenshot))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
