//! HTTP server command
//!
//! Opens the database, ensures the schema and serves the directory until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use fyyur_server::db::{create_pool_with_options, migrations};
use fyyur_server::http::run_server;

use super::SettingsArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, sources: &SettingsArgs) -> Result<()> {
    let settings = sources.resolve()?;

    let mut config = settings.server_config();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.cors_permissive {
        config.cors_permissive = true;
    }
    if let Some(secs) = args.timeout {
        config.request_timeout = Duration::from_secs(secs);
    }

    tracing::info!("Starting fyyur on {}", config.bind_addr);

    let pool = create_pool_with_options(&settings.database_url, settings.max_connections)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to prepare database schema")?;

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
