//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public routes of the shortener.
///
/// # Endpoints
///
/// - `GET /shorten?long_url=...` - Resolve or create the short URL
/// - `GET /{short_key}`          - 301 redirect to the stored long URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", get(shorten_handler))
        .route("/{short_key}", get(redirect_handler))
}
