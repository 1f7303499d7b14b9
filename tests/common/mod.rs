#![allow(dead_code)]

use async_trait::async_trait;
use quorum_shortener::domain::entities::UrlMapping;
use quorum_shortener::domain::repositories::UrlRepository;
use quorum_shortener::error::StoreError;
use quorum_shortener::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://localhost:8080";

/// In-memory stand-in for the store that records how often each operation ran.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    rows: Mutex<Vec<UrlMapping>>,
    pub inserts: AtomicUsize,
    pub long_url_lookups: AtomicUsize,
    pub short_key_lookups: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(short_key: &str, long_url: &str) -> Self {
        let repo = Self::new();
        repo.rows
            .lock()
            .unwrap()
            .push(UrlMapping::new(short_key, long_url));
        repo
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Rows grouped by short key, as a table keyed on `short_url` would hold them.
    pub fn distinct_keys(&self) -> HashMap<String, String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|m| (m.short_key.clone(), m.long_url.clone()))
            .collect()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, mapping: &UrlMapping) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("write timed out".to_string()));
        }

        self.rows.lock().unwrap().push(mapping.clone());
        Ok(())
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<String>, StoreError> {
        self.long_url_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("read timed out".to_string()));
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.long_url == long_url)
            .map(|m| m.short_key.clone()))
    }

    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<String>, StoreError> {
        self.short_key_lookups.fetch_add(1, Ordering::SeqCst);

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("read timed out".to_string()));
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.short_key == short_key)
            .map(|m| m.long_url.clone()))
    }
}

pub fn create_test_state(repository: Arc<InMemoryUrlRepository>) -> AppState {
    AppState::new(repository, BASE_URL)
}
