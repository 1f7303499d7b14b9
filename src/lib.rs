//! # Quorum Shortener
//!
//! A URL shortener that derives short keys deterministically from the long URL
//! and stores the mapping in ScyllaDB at QUORUM consistency.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The url mapping entity and the repository trait
//! - **Application Layer** ([`application`]) - Resolve-or-create and reverse lookup
//! - **Infrastructure Layer** ([`infrastructure`]) - ScyllaDB session, schema, repository
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//! - **Key derivation** ([`utils::key_deriver`]) - MD5 prefix rendered in base 62
//!
//! ## Quick Start
//!
//! ```bash
//! # Create keyspace, table and index
//! cargo run --bin admin -- schema apply
//!
//! # Start the service
//! cargo run
//!
//! curl 'http://localhost:8080/shorten?long_url=https://example.com/a/very/long/path'
//! ```
//!
//! ## Known Limitations
//!
//! - Distinct URLs can derive the same key; the later one is not detected.
//! - Check-then-insert is not atomic; concurrent first requests for one URL
//!   may both write (the same pair).
//! - The store session is released only on the graceful shutdown path.
//! - A URL whose key derives to `shorten` is stored but cannot be redirected:
//!   `GET /shorten` is the shortening endpoint and takes precedence.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, StoreError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Shortened, UrlService};
    pub use crate::domain::entities::UrlMapping;
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::{AppError, StoreError};
    pub use crate::state::AppState;
    pub use crate::utils::key_deriver::derive_short_key;
}
