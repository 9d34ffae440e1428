//! icees: run ICEES knowledge-graph queries from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Cohort → feature associations
//! icees get demos/get.json
//!
//! # Curie → feature associations, query read from stdin
//! cat demos/one_hop.json | icees one-hop -
//!
//! # Co-occurrence edges between the nodes of a knowledge graph
//! icees overlay demos/overlay.json
//!
//! # Print the type schema
//! icees schema
//! ```

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use icees_db::{FeatureCatalog, IdentifierCatalog, MemoryStore};
use icees_kg::{get_schema, Reasoner, ReasonerMessage};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "icees")]
#[command(about = "ICEES cohort knowledge-graph reasoner", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $ICEES_CONFIG, then ./icees.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Associations between a cohort and features of a target type
    Get {
        /// Query JSON file, `-` for stdin
        query: PathBuf,
    },

    /// Associations between the features of a curie and features of a target type
    OneHop {
        /// Query JSON file, `-` for stdin
        query: PathBuf,
    },

    /// Pairwise co-occurrence edges over a knowledge graph
    Overlay {
        /// Query JSON file, `-` for stdin
        query: PathBuf,
    },

    /// Print the supported (source, target, edge) type schema
    Schema,
}

fn read_query(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading query from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading query {}", path.display()))?
    };
    serde_json::from_str(&content).with_context(|| format!("parsing query {}", path.display()))
}

fn build_reasoner(config: &config::Config) -> Result<Reasoner> {
    let data = &config.data;
    let features = FeatureCatalog::load(&data.features)
        .with_context(|| format!("loading features from {}", data.features.display()))?;
    let identifiers = IdentifierCatalog::load(&data.identifiers)
        .with_context(|| format!("loading identifiers from {}", data.identifiers.display()))?;
    let store = MemoryStore::load(&data.store)
        .with_context(|| format!("loading store from {}", data.store.display()))?;

    info!("Data loaded from {}", data.store.display());
    Ok(Reasoner::new(Arc::new(store), Arc::new(features), Arc::new(identifiers))
        .with_settings(config.reasoner.clone()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(message: &ReasonerMessage) -> ExitCode {
    if message.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // An explicit --config must exist; the implicit one may be absent.
    let (config, load_error) = match &cli.config {
        Some(path) => (config::Config::load_from(path)?, None),
        None => match config::Config::load() {
            Ok(c) => (c, None),
            Err(e) => (config::Config::default(), Some(e)),
        },
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    if let Some(e) = load_error {
        warn!("Could not load icees.toml, using defaults: {e}");
    }

    let message = match cli.command {
        Commands::Schema => {
            print_json(get_schema())?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Get { query } => {
            let query = read_query(&query)?;
            build_reasoner(&config)?.get(&query).await
        }
        Commands::OneHop { query } => {
            let query = read_query(&query)?;
            build_reasoner(&config)?.one_hop(&query).await
        }
        Commands::Overlay { query } => {
            let query = read_query(&query)?;
            build_reasoner(&config)?.co_occurrence_overlay(&query).await
        }
    };

    print_json(&message)?;
    Ok(exit_code(&message))
}
