// src/config/models.rs
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Alias checked when the caller does not name one.
pub const DEFAULT_ALIAS: &str = "default";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub databases: BTreeMap<String, DatabaseConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub url: Url,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no databases configured")]
    NoDatabases,

    #[error("database alias must not be empty")]
    EmptyAlias,

    #[error("database '{alias}' uses unsupported scheme '{scheme}'")]
    UnsupportedScheme { alias: String, scheme: String },

    #[error("database '{alias}' has a zero connect timeout")]
    ZeroTimeout { alias: String },

    #[error("invalid database url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn default_connect_timeout() -> u64 {
    5
}

impl Config {
    /// Single-target config under the `default` alias.
    pub fn from_database_url(url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(url)?;
        let mut databases = BTreeMap::new();
        databases.insert(
            DEFAULT_ALIAS.to_string(),
            DatabaseConfig {
                url,
                connect_timeout_secs: default_connect_timeout(),
            },
        );

        let config = Self { databases };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.databases.is_empty() {
            return Err(ConfigError::NoDatabases);
        }

        for (alias, database) in &self.databases {
            if alias.trim().is_empty() {
                return Err(ConfigError::EmptyAlias);
            }

            match database.url.scheme() {
                "postgres" | "postgresql" => {}
                other => {
                    return Err(ConfigError::UnsupportedScheme {
                        alias: alias.clone(),
                        scheme: other.to_string(),
                    })
                }
            }

            if database.connect_timeout_secs == 0 {
                return Err(ConfigError::ZeroTimeout {
                    alias: alias.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn database(&self, alias: &str) -> Option<&DatabaseConfig> {
        self.databases.get(alias)
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Target database name, the URL path without its leading slash.
    pub fn database_name(&self) -> Option<&str> {
        let name = self.url.path().trim_start_matches('/');
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// URL with any password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        if url.password().is_some() && url.set_password(Some("***")).is_err() {
            return format!("{}://<redacted>", url.scheme());
        }
        url.to_string()
    }
}
