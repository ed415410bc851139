// src/cli/wait_for_db.rs
use super::args::WaitForDbArgs;
use crate::check::PostgresCheck;
use crate::config::{self, Config};
use crate::readiness::wait_for_database;
use crate::retry::TokioSleeper;
use anyhow::{bail, Context, Result};
use tracing::info;

/// Entry point for `wait-for-db`.
pub async fn run(args: WaitForDbArgs) -> Result<()> {
    let config = resolve_config(&args).await?;
    let check = PostgresCheck::new(config);

    wait_for_database(&check, TokioSleeper, &args.database)
        .await
        .with_context(|| format!("Database '{}' is not usable", args.database))?;

    Ok(())
}

/// A config file wins over a bare connection string.
pub async fn resolve_config(args: &WaitForDbArgs) -> Result<Config> {
    if let Some(path) = &args.config {
        info!("Loading configuration from: {}", path.display());
        return config::load_config(path).await;
    }

    match &args.database_url {
        Some(url) => Config::from_database_url(url).context("Invalid DATABASE_URL"),
        None => bail!("No database configured: pass --config or --database-url, or set DATABASE_URL"),
    }
}
