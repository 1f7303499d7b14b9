//! Url mapping entity: one short key paired with the long URL it stands for.

/// A persisted short key to long URL pair.
///
/// Mappings are written once, the first time a long URL is shortened, and never
/// updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub short_key: String,
    pub long_url: String,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(short_key: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            long_url: long_url.into(),
        }
    }
}
