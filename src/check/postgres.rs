// src/check/postgres.rs
use super::{CheckError, ConnectionCheck};
use crate::config::{Config, DatabaseConfig};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tokio::time::timeout;
use tracing::debug;

// SQLSTATE codes raised while the server is still coming up.
const INVALID_CATALOG_NAME: &str = "3D000";
const CANNOT_CONNECT_NOW: &str = "57P03";

/// Opens one short-lived connection per check and pings it.
#[derive(Debug, Clone)]
pub struct PostgresCheck {
    config: Config,
}

impl PostgresCheck {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn connect_and_ping(
        &self,
        alias: &str,
        database: &DatabaseConfig,
    ) -> Result<(), sqlx::Error> {
        let options: PgConnectOptions = database.url.as_str().parse()?;

        // The timeout bounds the whole attempt, handshake and ping together.
        let attempt = async {
            let mut conn = PgConnection::connect_with(&options).await?;
            conn.ping().await?;
            Ok::<_, sqlx::Error>(conn)
        };
        let conn = match timeout(database.connect_timeout(), attempt).await {
            Ok(result) => result?,
            Err(elapsed) => {
                return Err(sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    elapsed,
                )))
            }
        };

        if let Err(e) = conn.close().await {
            debug!("Closing readiness connection for '{}' failed: {}", alias, e);
        }

        Ok(())
    }
}

#[async_trait]
impl ConnectionCheck for PostgresCheck {
    async fn check(&self, alias: &str) -> Result<(), CheckError> {
        let database = self
            .config
            .database(alias)
            .ok_or_else(|| CheckError::UnknownAlias(alias.to_string()))?;

        debug!("Checking '{}' at {}", alias, database.redacted_url());

        self.connect_and_ping(alias, database)
            .await
            .map_err(|e| classify_sqlx_error(alias, database.database_name(), e))
    }
}

/// Sort a driver error into the transient or fatal tier.
pub fn classify_sqlx_error(
    alias: &str,
    database: Option<&str>,
    error: sqlx::Error,
) -> CheckError {
    let code = match &error {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    };

    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => CheckError::unreachable(alias, error),
        sqlx::Error::Database(_) => match code.as_deref() {
            Some(INVALID_CATALOG_NAME) => CheckError::NotProvisioned {
                alias: alias.to_string(),
                database: database.unwrap_or(alias).to_string(),
            },
            Some(CANNOT_CONNECT_NOW) => CheckError::unreachable(alias, error),
            _ => CheckError::fatal(alias, error),
        },
        other => CheckError::fatal(alias, other),
    }
}
