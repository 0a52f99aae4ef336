//! HTTP server command
//!
//! Resolves configuration, opens the pool, bootstraps the schema and serves
//! the ad API until Ctrl+C/SIGTERM. The pool is closed after the server stops.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use adboard_core::AdboardConfig;
use adboard_server::db::{self, migrations, MemoryAdStore, PgAdStore, StoreConfig};
use adboard_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Keep ads in process memory instead of PostgreSQL (lost on exit)
    #[arg(long, conflicts_with_all = ["database_url", "max_connections"])]
    pub in_memory: bool,
}

impl ServeArgs {
    /// Apply command-line overrides on top of the resolved config.
    pub fn apply(&self, config: &mut AdboardConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: AdboardConfig) -> Result<()> {
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    let server_config = ServerConfig::from(&config.server);
    tracing::info!("Starting adboard server on {}", server_config.bind_addr);

    if args.in_memory {
        tracing::warn!("Using in-memory store - ads will be lost on shutdown");
        return run_server(Arc::new(MemoryAdStore::new()), server_config)
            .await
            .context("Server error");
    }

    let store_config = StoreConfig::from(&config.database);
    let pool = db::connect(&store_config)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let result = run_server(Arc::new(PgAdStore::new(pool.clone())), server_config).await;

    pool.close().await;
    tracing::info!("Database pool closed");

    result.context("Server error")
}
