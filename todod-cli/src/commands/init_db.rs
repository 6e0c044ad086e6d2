//! Database initialization command
//!
//! Creates the database file and applies the schema without starting
//! the server.

use anyhow::{Context, Result};
use clap::Parser;

use todod_server::db::{migrations, SessionManager};

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (flag overrides the DATABASE_URL environment variable)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:todos.db")]
    pub database_url: String,
}

/// Create the schema and exit
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let sessions = SessionManager::connect(&args.database_url, 1)
        .await
        .context("Failed to connect to the storage engine")?;

    migrations::run(&sessions)
        .await
        .context("Failed to apply migrations")?;

    sessions.close().await;
    tracing::info!("Database ready at {}", args.database_url);

    Ok(())
}
