//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export SCYLLA_HOST="127.0.0.1"
//! export SCYLLA_PORT="9042"
//! export SCYLLA_KEYSPACE="url_shortener"
//! ```
//!
//! ## Optional Variables
//!
//! - `SCYLLA_HOST` - Store contact point (default: `127.0.0.1`)
//! - `SCYLLA_PORT` - Store CQL port (default: `9042`)
//! - `SCYLLA_KEYSPACE` - Keyspace holding the `urls` table (default: `url_shortener`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `BASE_URL` - Public origin used to build short URLs (default: `http://localhost:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! Consistency level and request timeout are fixed, see
//! [`crate::infrastructure::persistence::session`].

use anyhow::{Context, Result};
use std::env;
use url::Url;

const DEFAULT_SCYLLA_HOST: &str = "127.0.0.1";
const DEFAULT_SCYLLA_PORT: u16 = 9042;
const DEFAULT_KEYSPACE: &str = "url_shortener";
const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Longest keyspace name the store accepts.
const MAX_KEYSPACE_LEN: usize = 48;

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub keyspace: String,
}

impl StoreConfig {
    /// Loads store settings, falling back to the defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCYLLA_PORT` is set but is not a valid port.
    pub fn from_env() -> Result<Self> {
        let host = env::var("SCYLLA_HOST").unwrap_or_else(|_| DEFAULT_SCYLLA_HOST.to_string());

        let port = match env::var("SCYLLA_PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("SCYLLA_PORT must be a port number, got '{v}'"))?,
            Err(_) => DEFAULT_SCYLLA_PORT,
        };

        let keyspace = env::var("SCYLLA_KEYSPACE").unwrap_or_else(|_| DEFAULT_KEYSPACE.to_string());

        Ok(Self {
            host,
            port,
            keyspace,
        })
    }

    /// Returns the `host:port` contact point.
    pub fn node_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the store settings.
    ///
    /// The keyspace name is interpolated into schema CQL, so it must be a plain
    /// unquoted identifier.
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            anyhow::bail!("SCYLLA_HOST must not be empty");
        }

        if self.port == 0 {
            anyhow::bail!("SCYLLA_PORT must be greater than 0");
        }

        if !is_valid_keyspace(&self.keyspace) {
            anyhow::bail!(
                "SCYLLA_KEYSPACE must be 1-{} letters, digits or underscores starting with a letter, got '{}'",
                MAX_KEYSPACE_LEN,
                self.keyspace
            );
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SCYLLA_HOST.to_string(),
            port: DEFAULT_SCYLLA_PORT,
            keyspace: DEFAULT_KEYSPACE.to_string(),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub listen_addr: String,
    /// Public origin short URLs are built on, without trailing slash.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self> {
        let store = StoreConfig::from_env().context("Failed to load store configuration")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN.to_string());
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            store,
            listen_addr,
            base_url: base_url.trim_end_matches('/').to_string(),
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - store settings are invalid (see [`StoreConfig::validate`])
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `base_url` is not an absolute `http` or `https` URL
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL must be an absolute URL, got '{}'", self.base_url))?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!(
                "BASE_URL must use http or https, got '{}'",
                base_url.scheme()
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Store: {}", self.store.node_address());
        tracing::info!("  Keyspace: {}", self.store.keyspace);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn is_valid_keyspace(name: &str) -> bool {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return false;
    };

    name.len() <= MAX_KEYSPACE_LEN
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
