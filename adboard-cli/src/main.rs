//! adboard CLI - classified-ad CRUD service
//!
//! Entry point for the `adboard` binary:
//! - `serve`: run the HTTP API (PostgreSQL or in-memory store)
//! - `migrate`: create the `ads` table
//! - `config`: inspect the resolved configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use adboard_core::AdboardConfig;

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "adboard",
    author,
    version,
    about = "Classified-ad CRUD service over HTTP and PostgreSQL"
)]
struct Cli {
    /// Config file (default: ~/.adboard/config.toml if present)
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Debug logging (when RUST_LOG is not set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the ads table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
    /// Inspect adboard configuration (show, path)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let config = AdboardConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config).await,
        Commands::Migrate(args) => commands::run_migrate(args, config).await,
        Commands::Config(args) => commands::run_config(args, config),
    };

    tracing_setup::shutdown_otel();
    result
}
