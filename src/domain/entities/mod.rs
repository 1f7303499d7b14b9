//! Core domain entities.
//!
//! The service has a single entity, [`UrlMapping`]. It carries no behaviour of
//! its own; derivation lives in [`crate::utils::key_deriver`] and persistence
//! behind [`crate::domain::repositories::UrlRepository`].

pub mod url_mapping;

pub use url_mapping::UrlMapping;
