//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /shorten`.
///
/// A missing `long_url` deserializes to the empty string so that it is
/// reported by validation rather than by the extractor.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenQuery {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing 'long_url' parameter"))]
    pub long_url: String,
}

/// Response body of a successful shortening.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
