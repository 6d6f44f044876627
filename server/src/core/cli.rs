use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::DatabaseBackend;
use super::constants::{
    ENV_CONFIG, ENV_CORS_ORIGINS, ENV_DATABASE_BACKEND, ENV_DEBUG, ENV_HOST, ENV_JWT_SECRET,
    ENV_MYSQL_URL, ENV_PORT, ENV_SQLITE_PATH,
};

#[derive(Parser)]
#[command(name = "dispensary")]
#[command(version, about = "Dispensary strain catalog API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Disable authentication (for development)
    #[arg(long, global = true)]
    pub no_auth: bool,

    /// Enable debug mode (logs every request with its Origin)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Shared secret used to sign and verify bearer tokens
    #[arg(long, global = true, env = ENV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Allowed CORS origins (comma separated). Empty mirrors the request Origin.
    #[arg(long, global = true, env = ENV_CORS_ORIGINS, value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // Database options
    /// Database backend (sqlite or mysql)
    #[arg(long, global = true, env = ENV_DATABASE_BACKEND, value_parser = parse_database_backend)]
    pub database_backend: Option<DatabaseBackend>,

    /// SQLite database file (when using sqlite backend)
    #[arg(long, global = true, env = ENV_SQLITE_PATH)]
    pub sqlite_path: Option<PathBuf>,

    /// MySQL connection URL (when using mysql backend)
    #[arg(long, global = true, env = ENV_MYSQL_URL, hide_env_values = true)]
    pub mysql_url: Option<String>,
}

/// Parse database backend from CLI/env string
fn parse_database_backend(s: &str) -> Result<DatabaseBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(DatabaseBackend::Sqlite),
        "mysql" | "mariadb" => Ok(DatabaseBackend::Mysql),
        _ => Err(format!(
            "Invalid database backend '{}'. Valid options: sqlite, mysql",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Apply pending schema migrations and exit
    Migrate,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub no_auth: bool,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub jwt_secret: Option<String>,
    pub cors_origins: Option<Vec<String>>,
    pub database_backend: Option<DatabaseBackend>,
    pub sqlite_path: Option<PathBuf>,
    pub mysql_url: Option<String>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            no_auth: cli.no_auth,
            debug: cli.debug,
            config: cli.config,
            jwt_secret: cli.jwt_secret,
            cors_origins: cli.cors_origins,
            database_backend: cli.database_backend,
            sqlite_path: cli.sqlite_path,
            mysql_url: cli.mysql_url,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (cli.into(), command)
}
