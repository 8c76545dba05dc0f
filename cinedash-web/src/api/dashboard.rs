//! Dashboard view endpoints
//!
//! Each call recomputes the whole view from the cached table.

use axum::{extract::State, Json};

use super::ApiError;
use crate::pipeline::{build_view, DashboardView, FilterRequest};
use crate::AppState;

/// GET /api/dashboard
///
/// View with default widget state: all genres, full slider domains.
pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardView>, ApiError> {
    let table = state.cache.get_or_load().await?;
    Ok(Json(build_view(&table.movies, &FilterRequest::default())))
}

/// POST /api/dashboard
///
/// View for the widget state in the JSON body.
pub async fn post_dashboard(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<DashboardView>, ApiError> {
    let table = state.cache.get_or_load().await?;
    Ok(Json(build_view(&table.movies, &request)))
}
