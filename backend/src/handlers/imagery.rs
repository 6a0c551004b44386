//! HTTP handlers for satellite imagery overlays

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::TileCoord;

use crate::error::AppResult;
use crate::AppState;

/// Query parameters for the layer URL lookup
#[derive(Debug, Deserialize)]
pub struct LayerUrlQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerUrlResponse {
    pub template_url: String,
}

/// Tile template for a date; empty when no imagery is available
pub async fn get_layer_url(
    State(state): State<AppState>,
    Query(query): Query<LayerUrlQuery>,
) -> AppResult<Json<LayerUrlResponse>> {
    let template_url = state.imagery.layer_url(query.date).await?;
    Ok(Json(LayerUrlResponse { template_url }))
}

/// Redirect to one imagery tile addressed as zoom/column/row
pub async fn get_tile(
    State(state): State<AppState>,
    Path((date, z, x, y)): Path<(NaiveDate, u32, u32, u32)>,
) -> AppResult<Response> {
    let response = match state.imagery.tile_url(date, TileCoord::new(z, x, y)).await? {
        Some(url) => Redirect::temporary(&url).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}
