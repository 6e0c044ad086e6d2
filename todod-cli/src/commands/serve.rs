//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use todod_server::db::{SessionManager, DEFAULT_MAX_CONNECTIONS};
use todod_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL (flag overrides the DATABASE_URL environment variable)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:todos.db")]
    pub database_url: String,

    /// Maximum pooled sessions
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting todod server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        database_url: args.database_url,
        max_connections: args.max_connections,
    };

    let sessions = SessionManager::connect(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to the storage engine")?;

    run_server(sessions, config).await.context("Server error")?;

    Ok(())
}
