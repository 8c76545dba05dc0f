//! Cache control endpoints

use axum::{extract::State, Json};

use super::ApiError;
use crate::cache::CacheStatus;
use crate::AppState;

/// GET /api/cache
pub async fn cache_status(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.cache.status().await)
}

/// POST /api/cache/reload
///
/// Re-queries the store. On failure the previous table stays cached.
pub async fn reload_cache(State(state): State<AppState>) -> Result<Json<CacheStatus>, ApiError> {
    state.cache.reload().await?;
    Ok(Json(state.cache.status().await))
}

/// POST /api/cache/invalidate
pub async fn invalidate_cache(State(state): State<AppState>) -> Json<CacheStatus> {
    state.cache.invalidate().await;
    Json(state.cache.status().await)
}
