//! Repository trait for url mapping storage.

use crate::domain::entities::UrlMapping;
use crate::error::StoreError;
use async_trait::async_trait;

/// Storage contract for url mappings.
///
/// Implementations are shared across all request tasks and must be safe for
/// concurrent use without external locking. No method retries: a failed or
/// timed-out call is reported once and the caller decides what to do.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::ScyllaUrlRepository`] - ScyllaDB at quorum consistency
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a mapping.
    ///
    /// Inserting the same pair twice performs a second, redundant write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the write is not acknowledged.
    async fn insert(&self, mapping: &UrlMapping) -> Result<(), StoreError>;

    /// Finds the short key already assigned to `long_url`.
    ///
    /// Only the first matching row is considered.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(short_key))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] on any other failure.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<String>, StoreError>;

    /// Finds the long URL stored under `short_key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] on any failure other than a missing row.
    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<String>, StoreError>;
}
