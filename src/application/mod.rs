//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls and key derivation and expose a small
//! API to HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Resolve-or-create and reverse lookup

pub mod services;
