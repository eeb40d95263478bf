//! codemap - codebase introspection server
//!
//! Scans a project tree, builds its structure/stats/import-graph report, and
//! serves it over two read endpoints backed by a snapshot store.

mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use codemap_core::{ScanConfig, Scanner, SnapshotStore};
use server::AppState;

#[derive(Parser)]
#[command(name = "codemap", version, about = "Scan a project tree and serve its structure, stats, and import graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve GET /scan and GET /history over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8700")]
        addr: String,

        /// Scan root directory
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Snapshot database path (defaults to ~/.codemap/snapshots.db)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Display name for the structure root
        #[arg(long)]
        name: Option<String>,

        /// Maximum recursion depth for the walk
        #[arg(long, default_value_t = 5)]
        max_depth: usize,

        /// Maximum entries processed per directory
        #[arg(long, default_value_t = 100)]
        max_items: usize,
    },
    /// Run one scan and print the report as JSON
    Scan {
        /// Scan root directory
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Display name for the structure root
        #[arg(long)]
        name: Option<String>,

        /// Maximum recursion depth for the walk
        #[arg(long, default_value_t = 5)]
        max_depth: usize,

        /// Maximum entries processed per directory
        #[arg(long, default_value_t = 100)]
        max_items: usize,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            addr,
            root,
            db,
            name,
            max_depth,
            max_items,
        } => {
            let config = scan_config(root, name, max_depth, max_items);
            let db_path = match db {
                Some(path) => path,
                None => default_db_path()?,
            };
            let state = AppState {
                scanner: Scanner::new(config),
                store: SnapshotStore::open(&db_path)?,
            };
            server::serve(&addr, state)
        }
        Command::Scan {
            root,
            name,
            max_depth,
            max_items,
            pretty,
        } => {
            let config = scan_config(root, name, max_depth, max_items);
            let report = Scanner::new(config).scan()?;
            let output = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", output);
            Ok(())
        }
    }
}

fn scan_config(
    root: PathBuf,
    name: Option<String>,
    max_depth: usize,
    max_items: usize,
) -> ScanConfig {
    let mut config = ScanConfig::new(root);
    config.project_name = name;
    config.max_depth = max_depth;
    config.max_items = max_items;
    config
}

fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".codemap").join("snapshots.db"))
}
