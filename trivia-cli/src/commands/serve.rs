//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::{create_pool, migrations};
use trivia_server::{run_server, AppState, MemoryStore, PgStore, ServerConfig};

use super::require_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000", env = "TRIVIA_BIND")]
    pub bind: SocketAddr,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Serve from a seeded in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
    };

    let state = if args.memory {
        tracing::warn!("Serving from in-memory store; changes are lost on exit");
        AppState::new(MemoryStore::seeded())
    } else {
        let database_url = require_database_url(args.database_url)?;

        let pool = create_pool(&database_url)
            .await
            .context("Failed to create database pool")?;

        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;

        AppState::new(PgStore::new(pool))
    };

    tracing::info!("Starting trivia server on {}", args.bind);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
