// src/cli/args.rs
use crate::config::DEFAULT_ALIAS;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Administrative commands for service startup
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Block until the database accepts connections
    WaitForDb(WaitForDbArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct WaitForDbArgs {
    /// YAML or JSON file listing database aliases
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Postgres connection string, used when no config file is given
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database alias to wait for
    #[clap(short, long, default_value = DEFAULT_ALIAS)]
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wait_for_db_defaults() {
        let args = Args::try_parse_from(["wait-for-db", "wait-for-db"]).unwrap();

        let Command::WaitForDb(args) = args.command;
        assert_eq!(args.database, DEFAULT_ALIAS);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_wait_for_db_flags() {
        let args = Args::try_parse_from([
            "wait-for-db",
            "wait-for-db",
            "--config",
            "databases.yaml",
            "--database",
            "reporting",
            "--database-url",
            "postgres://db/app",
        ])
        .unwrap();

        let Command::WaitForDb(args) = args.command;
        assert_eq!(args.config, Some(PathBuf::from("databases.yaml")));
        assert_eq!(args.database, "reporting");
        assert_eq!(args.database_url.as_deref(), Some("postgres://db/app"));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["wait-for-db", "migrate"]).is_err());
    }
}
