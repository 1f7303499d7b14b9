//! Infrastructure layer for external integrations.
//!
//! Implements the storage contract defined by the domain layer on top of the
//! ScyllaDB driver.
//!
//! # Modules
//!
//! - [`persistence`] - ScyllaDB session, schema and repository

pub mod persistence;
