//! Alliance of Magicians site
//!
//! Serves the magician plugin over HTTP: the random magician REST endpoint,
//! single magician pages, and the featured magician settings screen.
//!
//! Usage:
//!   aom-server --port 8080 --config aom.toml --database site.db
//!
//! Without `--database` records and settings live in memory and are lost on
//! exit.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use aom_model::Record;
use aom_plugin::{AllianceOfMagicians, PluginConfig};
use aom_server::{AppState, build_router};
use aom_storage::{MemoryStore, SqliteStore};
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "aom-server")]
#[command(about = "Alliance of Magicians site")]
struct Args {
    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Path to the site config file
    #[arg(short, long, default_value = "aom.toml")]
    config: PathBuf,

    /// SQLite database path; records are kept in memory when omitted
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// JSON file with an array of records to load at startup
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_seed(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("Alliance of Magicians site starting...");
    let config = PluginConfig::load_from(&args.config);
    let seed = match &args.seed {
        Some(path) => load_seed(path)?,
        None => Vec::new(),
    };

    let plugin = match &args.database {
        Some(path) => {
            let store = SqliteStore::open(path, config.permalinks())
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            for record in &seed {
                store.insert(record)?;
            }
            info!("Using database at {}", path.display());
            AllianceOfMagicians::from_config(&config, Arc::new(store))
        }
        None => {
            let store = MemoryStore::new(config.permalinks());
            for record in seed.iter().cloned() {
                store.insert(record)?;
            }
            info!("Using in-memory store");
            AllianceOfMagicians::from_config(&config, Arc::new(store))
        }
    };
    if !seed.is_empty() {
        info!("Loaded {} seed records", seed.len());
    }

    let site_url = config.site_url.clone();
    let app = build_router(Arc::new(AppState::new(plugin, config)));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", args.port))?;
    info!("Listening on port {} as {}", args.port, site_url);
    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
