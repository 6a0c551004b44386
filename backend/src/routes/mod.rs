//! Route definitions for the Apollo Terra API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/crops", get(handlers::list_crops))
        .nest("/regions", region_routes())
        .nest("/analysis", analysis_routes())
        // Satellite overlay
        .route("/gibs-layer-url", get(handlers::get_layer_url))
        .route("/tiles/:date/:z/:x/:y", get(handlers::get_tile))
}

/// Cultivated region routes
fn region_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_regions))
        .route("/summary", get(handlers::region_summary))
        .route("/:region_id", get(handlers::get_region))
}

/// Point analysis routes
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::analyze_point))
        .route(
            "/:session_id",
            get(handlers::get_analysis_state).delete(handlers::reset_analysis),
        )
}
