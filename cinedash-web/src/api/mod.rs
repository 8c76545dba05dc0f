//! HTTP API handlers for cinedash-web

pub mod cache;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod ui;

pub use cache::{cache_status, invalidate_cache, reload_cache};
pub use dashboard::{get_dashboard, post_dashboard};
pub use error::ApiError;
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
