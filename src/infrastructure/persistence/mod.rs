//! ScyllaDB persistence.
//!
//! - [`session`] - Session construction with the fixed execution profile
//! - [`schema`] - CQL for the keyspace, `urls` table and `long_url` index
//! - [`ScyllaUrlRepository`] - Url mapping storage and retrieval

pub mod schema;
pub mod scylla_url_repository;
pub mod session;

pub use scylla_url_repository::ScyllaUrlRepository;
