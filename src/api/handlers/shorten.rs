//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenQuery, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short URL for a long URL, creating it on first request.
///
/// # Endpoint
///
/// `GET /shorten?long_url=<url>`
///
/// The long URL is taken verbatim; it is neither parsed nor normalized.
///
/// # Response
///
/// ```json
/// { "short_url": "http://localhost:8080/Ab3xY9qZ" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `long_url` is missing or empty.
/// Returns 500 Internal Server Error if the store lookup or insert fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Query(query): Query<ShortenQuery>,
) -> Result<Json<ShortenResponse>, AppError> {
    query.validate()?;

    let shortened = state
        .url_service
        .resolve_or_create(&query.long_url)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: state.url_service.short_url(&shortened.mapping.short_key),
    }))
}
