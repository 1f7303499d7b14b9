//! Repository trait definitions for the domain layer.
//!
//! - [`UrlRepository`] - Short key / long URL storage
//!
//! The production implementation is
//! [`crate::infrastructure::persistence::ScyllaUrlRepository`]; a `mockall`
//! mock is generated under `cfg(test)`.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
