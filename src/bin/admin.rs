//! CLI administration tool for quorum-shortener.
//!
//! Provides commands for preparing the store schema and inspecting mappings
//! without going through the HTTP front-end.
//!
//! # Usage
//!
//! ```bash
//! # Create keyspace, table and index
//! cargo run --bin admin -- schema apply --replication-factor 3
//!
//! # Print the schema CQL
//! cargo run --bin admin -- schema print
//!
//! # Check store connection
//! cargo run --bin admin -- db check
//!
//! # Resolve a short key
//! cargo run --bin admin -- lookup Ab3xY9qZ
//!
//! # Shorten a URL directly
//! cargo run --bin admin -- shorten https://example.com/a/very/long/path
//!
//! # Compute a key without touching the store
//! cargo run --bin admin -- derive https://example.com/a/very/long/path
//! ```
//!
//! # Environment Variables
//!
//! - `SCYLLA_HOST`, `SCYLLA_PORT`, `SCYLLA_KEYSPACE` - see the `config` module
//! - `BASE_URL` - used to print full short URLs

use quorum_shortener::application::services::UrlService;
use quorum_shortener::config::{Config, StoreConfig};
use quorum_shortener::infrastructure::persistence::{ScyllaUrlRepository, schema, session};
use quorum_shortener::utils::key_deriver::{derive_short_key, is_well_formed};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing quorum-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage the store schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },

    /// Store connection diagnostics
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Resolve a short key to its long URL
    Lookup {
        /// Short key to resolve
        short_key: String,
    },

    /// Shorten a long URL (creates the mapping if needed)
    Shorten {
        /// Long URL, used verbatim
        long_url: String,
    },

    /// Print the short key a long URL derives to, without touching the store
    Derive {
        /// Long URL, used verbatim
        long_url: String,
    },
}

/// Schema subcommands.
#[derive(Subcommand)]
enum SchemaAction {
    /// Create keyspace, `urls` table and `long_url` index if missing
    Apply {
        /// Replication factor for a newly created keyspace
        #[arg(short, long, default_value_t = 1)]
        replication_factor: u32,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the schema CQL
    Print {
        /// Replication factor for a newly created keyspace
        #[arg(short, long, default_value_t = 1)]
        replication_factor: u32,
    },
}

/// Store diagnostic subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connection and keyspace
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema { action } => handle_schema_action(action).await?,
        Commands::Db { action } => handle_db_action(action).await?,
        Commands::Lookup { short_key } => lookup(short_key).await?,
        Commands::Shorten { long_url } => shorten(long_url).await?,
        Commands::Derive { long_url } => derive(&long_url),
    }

    Ok(())
}

fn store_config() -> Result<StoreConfig> {
    let store = StoreConfig::from_env()?;
    store.validate()?;
    Ok(store)
}

async fn connect() -> Result<Arc<ScyllaUrlRepository>> {
    let store = store_config()?;

    let repository = ScyllaUrlRepository::connect(&store)
        .await
        .with_context(|| format!("Failed to connect to {}", store.node_address()))?;

    Ok(Arc::new(repository))
}

/// Dispatches schema commands.
///
/// `apply` opens a session without selecting a keyspace, since the keyspace
/// may not exist yet.
async fn handle_schema_action(action: SchemaAction) -> Result<()> {
    let store = store_config()?;

    match action {
        SchemaAction::Print { replication_factor } => {
            for cql in schema::statements(&store.keyspace, replication_factor) {
                println!("{cql};");
            }
        }
        SchemaAction::Apply {
            replication_factor,
            yes,
        } => {
            println!("{}", "🛠  Apply Schema".bright_blue().bold());
            println!();
            println!("  Node:               {}", store.node_address().cyan());
            println!("  Keyspace:           {}", store.keyspace.cyan());
            println!(
                "  Replication factor: {}",
                replication_factor.to_string().cyan()
            );
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Apply schema?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let session = session::open(&store, false)
                .await
                .context("Failed to connect to store")?;

            schema::apply(&session, &store.keyspace, replication_factor)
                .await
                .context("Failed to apply schema")?;

            println!("{}", "✅ Schema applied".green().bold());
        }
    }

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking store connection...".bright_blue());

            let repository = connect().await?;
            repository.ping().await?;
            repository.close().await;

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}

/// Resolves a short key and prints the long URL.
async fn lookup(short_key: String) -> Result<()> {
    if !is_well_formed(&short_key) {
        println!(
            "{}",
            "⚠️  Key is not 6-8 base-62 characters; it cannot have been derived".yellow()
        );
    }

    let repository = connect().await?;
    let service = UrlService::new(repository.clone(), base_url());

    let result = service.resolve(&short_key).await;
    drop(service);
    repository.close().await;

    match result {
        Ok(long_url) => {
            println!("  {} → {}", short_key.cyan(), long_url.bright_white());
        }
        Err(e) => {
            println!("{} {}", "❌".red(), e.to_string().red());
        }
    }

    Ok(())
}

/// Runs resolve-or-create and prints the resulting short URL.
async fn shorten(long_url: String) -> Result<()> {
    let repository = connect().await?;
    let service = UrlService::new(repository.clone(), base_url());

    let result = service
        .resolve_or_create(&long_url)
        .await
        .map(|s| (service.short_url(&s.mapping.short_key), s.created));
    drop(service);
    repository.close().await;

    let (short_url, created) = result.map_err(|e| anyhow::anyhow!("Failed to shorten: {}", e))?;

    let status = if created {
        "CREATED".green()
    } else {
        "EXISTING".bright_black()
    };

    println!("  {} {}", short_url.bright_yellow().bold(), status);

    Ok(())
}

/// Prints the derived key for a long URL.
fn derive(long_url: &str) {
    println!("{}", derive_short_key(long_url));
}

/// Base URL for printed short URLs, falling back to the server default.
fn base_url() -> String {
    Config::from_env()
        .map(|c| c.base_url)
        .unwrap_or_else(|_| "http://localhost:8080".to_string())
}
