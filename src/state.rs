//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Application state cloned into every request.
///
/// The store session is reached through [`UrlService`]; nothing here is
/// mutable, so clones share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
}

impl AppState {
    /// Builds state around a repository and the public base URL.
    pub fn new(repository: Arc<dyn UrlRepository>, base_url: impl Into<String>) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, base_url)),
        }
    }
}
