//! Utility functions.
//!
//! - [`key_deriver`] - Deterministic short key derivation

pub mod key_deriver;
