//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use percent_encoding::{CONTROLS, utf8_percent_encode};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{short_key}`
///
/// Every request performs one quorum read; there is no cache.
///
/// # Errors
///
/// Returns 404 Not Found if the key is unknown, and also if the lookup itself
/// fails. Lookup failures are logged before being reported as 404.
pub async fn redirect_handler(
    Path(short_key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = match state.url_service.resolve(&short_key).await {
        Ok(long_url) => long_url,
        Err(AppError::Internal { details, .. }) => {
            warn!(%short_key, reason = %details["reason"], "lookup failed, answering 404");
            return Err(not_found(&short_key));
        }
        Err(e) => return Err(e),
    };

    let location = HeaderValue::try_from(location_value(&long_url)).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short_key": short_key }),
        )
    })?;

    debug!(%short_key, "redirecting");

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

fn not_found(short_key: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "short_key": short_key }))
}

/// Escapes control bytes and non-ASCII text so any stored string is a valid
/// `Location` header. Already-escaped sequences are left as they are.
fn location_value(long_url: &str) -> String {
    utf8_percent_encode(long_url, CONTROLS).to_string()
}
