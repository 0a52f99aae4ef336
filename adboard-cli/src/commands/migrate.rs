//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use adboard_core::AdboardConfig;
use adboard_server::db::{self, migrations, StoreConfig};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Create the `ads` table if it is missing, then exit
pub async fn run_migrate(args: MigrateArgs, mut config: AdboardConfig) -> Result<()> {
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    config.validate().context("Invalid configuration")?;

    let pool = db::connect(&StoreConfig::from(&config.database))
        .await
        .context("Failed to create database pool")?;

    let result = migrations::run(&pool)
        .await
        .context("Failed to run database migrations");
    pool.close().await;

    result?;
    println!("✅ Schema is up to date");
    Ok(())
}
