//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub crops: usize,
    pub regions: usize,
    pub imagery: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let imagery = match &state.config.imagery.upstream_url {
        Some(_) => "upstream".to_string(),
        None => "local".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        crops: state.analyzer.catalog.len(),
        regions: state.analyzer.regions.all().len(),
        imagery,
    })
}
