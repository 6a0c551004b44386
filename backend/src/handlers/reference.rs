//! HTTP handlers for crop and region reference data

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{CropProfile, CultivatedRegion, RegionFilter, RegionSummary};

use crate::error::AppResult;
use crate::services::ReferenceService;
use crate::AppState;

/// List the crop catalog in scoring order
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropProfile>> {
    let service = ReferenceService::new(state.analyzer);
    Json(service.crops())
}

/// Query parameters for region listing
#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    pub status: Option<RegionFilter>,
}

/// List monitored regions, optionally by vegetation health
pub async fn list_regions(
    State(state): State<AppState>,
    Query(query): Query<RegionQuery>,
) -> Json<Vec<CultivatedRegion>> {
    let service = ReferenceService::new(state.analyzer);
    Json(service.regions(query.status.unwrap_or_default()))
}

/// Aggregate figures for the dashboard header
pub async fn region_summary(State(state): State<AppState>) -> Json<RegionSummary> {
    let service = ReferenceService::new(state.analyzer);
    Json(service.summary())
}

/// Get a region by ID
pub async fn get_region(
    State(state): State<AppState>,
    Path(region_id): Path<u32>,
) -> AppResult<Json<CultivatedRegion>> {
    let service = ReferenceService::new(state.analyzer);
    let region = service.region(region_id)?;
    Ok(Json(region))
}
