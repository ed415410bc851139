// src/check/mod.rs
mod error;
mod postgres;

pub use error::{CheckError, ErrorKind};
pub use postgres::{classify_sqlx_error, PostgresCheck};

use async_trait::async_trait;

/// A single readiness probe against a named database alias.
#[async_trait]
pub trait ConnectionCheck: Send + Sync {
    async fn check(&self, alias: &str) -> Result<(), CheckError>;
}
