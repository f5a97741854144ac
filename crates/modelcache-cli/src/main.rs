//! modelcache CLI
//!
//! Command-line interface for resolving model names through a headless cache.

mod commands;

use clap::{Parser, Subcommand};
use modelcache_core::ClientConfig;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// modelcache - resolve entity model names the way the client does
#[derive(Parser, Debug)]
#[command(name = "modelcache")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve model names to cached instances
    Resolve {
        /// Model names or block ids (e.g. pig, 42, humanoid)
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List the model names that can be built on demand
    Kinds,

    /// Resolve names, then show cache statistics
    Stats {
        /// Model names or block ids to resolve first
        names: Vec<String>,
    },
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        parse_level(&config.logging.level)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    debug!(config = ?cli.config, "Loaded configuration");

    match cli.command {
        Commands::Resolve { names } => {
            let mut cache = commands::build_cache(&config)?;
            commands::resolve(&mut cache, &names, cli.json)?;
            commands::shutdown(cache);
        }
        Commands::Kinds => {
            commands::kinds(cli.json)?;
        }
        Commands::Stats { names } => {
            let mut cache = commands::build_cache(&config)?;
            commands::stats(&mut cache, &names, cli.json)?;
            commands::shutdown(cache);
        }
    }

    Ok(())
}
