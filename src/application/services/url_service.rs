//! Short key creation and reverse lookup service.

use std::sync::Arc;

use crate::domain::entities::UrlMapping;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::key_deriver::derive_short_key;
use serde_json::json;
use tracing::{debug, error, info};

/// Outcome of [`UrlService::resolve_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    pub mapping: UrlMapping,
    /// `false` when the long URL already had a stored key.
    pub created: bool,
}

/// Service for shortening long URLs and resolving short keys.
///
/// Holds no state besides the shared repository handle and the public base URL,
/// so a single instance serves every request concurrently.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    base_url: String,
}

impl UrlService {
    /// Creates a new url service.
    ///
    /// `base_url` is the public origin short URLs are built on, for example
    /// `http://localhost:8080`. A trailing slash is ignored.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            repository,
            base_url,
        }
    }

    /// Returns the short key for `long_url`, creating the mapping on first use.
    ///
    /// # Flow
    ///
    /// 1. Look up an existing key for the long URL; return it if found
    /// 2. Derive the key from the long URL
    /// 3. Persist the pair and return it
    ///
    /// The lookup and the insert are not atomic. Two concurrent first-time
    /// requests for the same URL may both insert; since derivation is
    /// deterministic both write the same pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is empty.
    ///
    /// Returns [`AppError::Internal`] if the lookup or the insert fails. Nothing
    /// is retried and nothing is rolled back.
    pub async fn resolve_or_create(&self, long_url: &str) -> Result<Shortened, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request(
                "Missing 'long_url' parameter",
                json!({ "fields": ["long_url"] }),
            ));
        }

        let existing = self
            .repository
            .find_by_long_url(long_url)
            .await
            .map_err(|e| {
                error!(error = %e, "existence check failed");
                AppError::store("Error checking URL", &e)
            })?;

        if let Some(short_key) = existing {
            debug!(%short_key, "long URL already shortened");
            return Ok(Shortened {
                mapping: UrlMapping::new(short_key, long_url),
                created: false,
            });
        }

        let mapping = UrlMapping::new(derive_short_key(long_url), long_url);

        self.repository.insert(&mapping).await.map_err(|e| {
            error!(error = %e, short_key = %mapping.short_key, "failed to persist mapping");
            AppError::store("Error saving URL to database", &e)
        })?;

        info!(short_key = %mapping.short_key, "created short URL");

        Ok(Shortened {
            mapping,
            created: true,
        })
    }

    /// Resolves a short key to the long URL it was created for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists for the key.
    /// Returns [`AppError::Internal`] if the lookup fails.
    pub async fn resolve(&self, short_key: &str) -> Result<String, AppError> {
        self.repository
            .find_by_short_key(short_key)
            .await
            .map_err(|e| {
                error!(error = %e, %short_key, "reverse lookup failed");
                AppError::store("Error resolving short URL", &e)
            })?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "short_key": short_key }))
            })
    }

    /// Constructs the public short URL for a key.
    pub fn short_url(&self, short_key: &str) -> String {
        format!("{}/{}", self.base_url, short_key)
    }
}
