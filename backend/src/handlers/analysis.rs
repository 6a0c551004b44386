//! HTTP handlers for point analysis

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::{is_within_ceara, AnalysisState, PointCoordinate};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

/// Request body for analyzing a map click
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzePointRequest {
    pub session_id: Uuid,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Analyze a point. Responds 204 when a newer request for the session won.
pub async fn analyze_point(
    State(state): State<AppState>,
    Json(input): Json<AnalyzePointRequest>,
) -> AppResult<Response> {
    input.validate()?;

    if !is_within_ceara(input.latitude, input.longitude) {
        tracing::debug!(
            "Point {}, {} is outside Ceará; estimates are extrapolated",
            input.latitude,
            input.longitude
        );
    }

    let point = PointCoordinate::new(input.latitude, input.longitude);
    let response = match state.analysis.analyze(input.session_id, point).await {
        Some(report) => Json(report).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

/// Current state of an analysis panel
pub async fn get_analysis_state(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Json<AnalysisState> {
    Json(state.analysis.state(session_id).await)
}

/// Close an analysis panel
pub async fn reset_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> StatusCode {
    state.analysis.reset(session_id).await;
    StatusCode::NO_CONTENT
}
