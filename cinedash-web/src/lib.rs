//! cinedash-web library - movie dashboard service
//!
//! Loads the `movies` table once, then answers every widget change with a
//! freshly computed view: genre and range filters, table view, and chart
//! datasets.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cache;
pub mod db;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod present;

use cache::MovieCache;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Memoized movie table
    pub cache: Arc<MovieCache>,
}

impl AppState {
    /// Create new application state around a read-only pool
    pub fn new(db: SqlitePool) -> Self {
        Self {
            cache: Arc::new(MovieCache::new(db)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route(
            "/api/dashboard",
            get(api::get_dashboard).post(api::post_dashboard),
        )
        .route("/api/cache", get(api::cache_status))
        .route("/api/cache/reload", post(api::reload_cache))
        .route("/api/cache/invalidate", post(api::invalidate_cache));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
