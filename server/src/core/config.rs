use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, MIN_JWT_SECRET_LEN,
    MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS, MYSQL_DEFAULT_IDLE_TIMEOUT_SECS,
    MYSQL_DEFAULT_MAX_CONNECTIONS, MYSQL_DEFAULT_MAX_LIFETIME_SECS, MYSQL_DEFAULT_MIN_CONNECTIONS,
    SQLITE_DB_FILENAME,
};

// =============================================================================
// Database Backend Enum (SQLite or MySQL)
// =============================================================================

/// Database backend holding the strain catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Sqlite,
    Mysql,
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseBackend::Sqlite => write!(f, "sqlite"),
            DatabaseBackend::Mysql => write!(f, "mysql"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Authentication configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthFileConfig {
    pub enabled: Option<bool>,
    /// Shared signing secret (prefer DISPENSARY_JWT_SECRET in production)
    pub jwt_secret: Option<String>,
}

/// CORS configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CorsFileConfig {
    /// Explicit origin list. Empty or absent mirrors the request Origin.
    pub allowed_origins: Option<Vec<String>>,
}

/// SQLite configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SqliteFileConfig {
    pub path: Option<String>,
}

/// MySQL configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MysqlFileConfig {
    /// MySQL connection URL (or use DISPENSARY_MYSQL_URL env var)
    pub url: Option<String>,
    /// Maximum number of connections in the pool (default: 10)
    pub max_connections: Option<u32>,
    /// Minimum number of connections to keep warm (default: 1)
    pub min_connections: Option<u32>,
    /// Connection acquire timeout in seconds (default: 30)
    pub acquire_timeout_secs: Option<u64>,
    /// Idle connection timeout in seconds (default: 600)
    pub idle_timeout_secs: Option<u64>,
    /// Max connection lifetime in seconds (default: 1800)
    pub max_lifetime_secs: Option<u64>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Backend: sqlite (default) or mysql
    pub backend: Option<DatabaseBackend>,
    pub sqlite: Option<SqliteFileConfig>,
    pub mysql: Option<MysqlFileConfig>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub auth: Option<AuthFileConfig>,
    pub cors: Option<CorsFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Read one JSON layer, warning about top-level keys nothing consumes
    fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        let layer: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;

        if let serde_json::Value::Object(unknown) = &layer.extra
            && !unknown.is_empty()
        {
            let keys: Vec<&str> = unknown.keys().map(String::as_str).collect();
            tracing::warn!(path = %path.display(), keys = ?keys, "Ignoring unknown config keys");
        }
        tracing::debug!(path = %path.display(), "Loaded config layer");
        Ok(layer)
    }

    /// Layer `other` on top of this config, field by field
    fn merge(&mut self, other: FileConfig) {
        overlay_section(&mut self.server, other.server);
        overlay_section(&mut self.auth, other.auth);
        overlay_section(&mut self.cors, other.cors);
        overlay_section(&mut self.database, other.database);
        self.debug = other.debug.or(self.debug);
    }
}

/// A config section whose set fields replace those of a lower layer
trait Overlay: Default {
    fn overlay(&mut self, upper: Self);
}

fn overlay_section<T: Overlay>(lower: &mut Option<T>, upper: Option<T>) {
    if let Some(upper) = upper {
        lower.get_or_insert_with(T::default).overlay(upper);
    }
}

impl Overlay for ServerFileConfig {
    fn overlay(&mut self, upper: Self) {
        self.host = upper.host.or(self.host.take());
        self.port = upper.port.or(self.port);
    }
}

impl Overlay for AuthFileConfig {
    fn overlay(&mut self, upper: Self) {
        self.enabled = upper.enabled.or(self.enabled);
        self.jwt_secret = upper.jwt_secret.or(self.jwt_secret.take());
    }
}

impl Overlay for CorsFileConfig {
    fn overlay(&mut self, upper: Self) {
        self.allowed_origins = upper.allowed_origins.or(self.allowed_origins.take());
    }
}

impl Overlay for SqliteFileConfig {
    fn overlay(&mut self, upper: Self) {
        self.path = upper.path.or(self.path.take());
    }
}

impl Overlay for MysqlFileConfig {
    fn overlay(&mut self, upper: Self) {
        self.url = upper.url.or(self.url.take());
        self.max_connections = upper.max_connections.or(self.max_connections);
        self.min_connections = upper.min_connections.or(self.min_connections);
        self.acquire_timeout_secs = upper.acquire_timeout_secs.or(self.acquire_timeout_secs);
        self.idle_timeout_secs = upper.idle_timeout_secs.or(self.idle_timeout_secs);
        self.max_lifetime_secs = upper.max_lifetime_secs.or(self.max_lifetime_secs);
    }
}

impl Overlay for DatabaseFileConfig {
    fn overlay(&mut self, upper: Self) {
        self.backend = upper.backend.or(self.backend);
        overlay_section(&mut self.sqlite, upper.sqlite);
        overlay_section(&mut self.mysql, upper.mysql);
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    /// Configured signing secret; a random per-process key is used when absent
    pub jwt_secret: Option<String>,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty list mirrors the request Origin
    pub allowed_origins: Vec<String>,
}

/// SQLite configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub path: PathBuf,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: default_sqlite_path(),
        }
    }
}

/// MySQL configuration (final/runtime)
///
/// Zero values fall back to the built-in pool defaults when the pool is built.
#[derive(Debug, Clone, Default)]
pub struct MysqlConfig {
    /// MySQL connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep warm
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,
    /// Max connection lifetime in seconds
    pub max_lifetime_secs: u64,
}

/// Database configuration (final/runtime)
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub sqlite: SqliteConfig,
    /// Only present when backend = mysql
    pub mysql: Option<MysqlConfig>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Defaults, then `~/.dispensary/dispensary.json`, then `./dispensary.json`
    /// (or `--config`), then flags and `DISPENSARY_*` env vars.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut file_config = FileConfig::default();
        for path in config_layers(cli)? {
            file_config.merge(FileConfig::read(&path)?);
        }

        let config = Self::layer(file_config, cli);
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            auth_enabled = config.auth.enabled,
            jwt_secret_configured = config.auth.jwt_secret.is_some(),
            cors_origins = ?config.cors.allowed_origins,
            database_backend = %config.database.backend,
            debug = config.debug,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Layer merged file values and CLI/env overrides on top of defaults
    fn layer(file_config: FileConfig, cli: &CliConfig) -> Self {
        let file_server = file_config.server.unwrap_or_default();
        let file_auth = file_config.auth.unwrap_or_default();
        let file_cors = file_config.cors.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();
        let file_sqlite = file_database.sqlite.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        // auth.enabled: file config sets default, --no-auth CLI flag disables
        let auth_enabled = if cli.no_auth {
            false
        } else {
            file_auth.enabled.unwrap_or(true)
        };
        let jwt_secret = cli.jwt_secret.clone().or(file_auth.jwt_secret);

        let allowed_origins = cli
            .cors_origins
            .clone()
            .or(file_cors.allowed_origins)
            .unwrap_or_default()
            .into_iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let backend = cli
            .database_backend
            .or(file_database.backend)
            .unwrap_or_default();

        let sqlite_path = cli
            .sqlite_path
            .clone()
            .or_else(|| file_sqlite.path.as_deref().map(expand_home))
            .unwrap_or_else(default_sqlite_path);

        // MySQL section only materializes when it is the selected backend
        let mysql = if backend == DatabaseBackend::Mysql {
            let file_mysql = file_database.mysql.unwrap_or_default();
            Some(MysqlConfig {
                url: cli.mysql_url.clone().or(file_mysql.url).unwrap_or_default(),
                max_connections: file_mysql
                    .max_connections
                    .unwrap_or(MYSQL_DEFAULT_MAX_CONNECTIONS),
                min_connections: file_mysql
                    .min_connections
                    .unwrap_or(MYSQL_DEFAULT_MIN_CONNECTIONS),
                acquire_timeout_secs: file_mysql
                    .acquire_timeout_secs
                    .unwrap_or(MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS),
                idle_timeout_secs: file_mysql
                    .idle_timeout_secs
                    .unwrap_or(MYSQL_DEFAULT_IDLE_TIMEOUT_SECS),
                max_lifetime_secs: file_mysql
                    .max_lifetime_secs
                    .unwrap_or(MYSQL_DEFAULT_MAX_LIFETIME_SECS),
            })
        } else {
            None
        };

        let debug = cli.debug || file_config.debug.unwrap_or(false);

        Self {
            server: ServerConfig { host, port },
            auth: AuthConfig {
                enabled: auth_enabled,
                jwt_secret,
            },
            cors: CorsConfig { allowed_origins },
            database: DatabaseConfig {
                backend,
                sqlite: SqliteConfig { path: sqlite_path },
                mysql,
            },
            debug,
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.server.host.is_empty(), "Configuration error: server.host is empty");
        // Port 0 would bind an ephemeral port nobody knows about
        anyhow::ensure!(self.server.port != 0, "Configuration error: server.port is 0");

        if let Some(secret) = &self.auth.jwt_secret
            && secret.len() < MIN_JWT_SECRET_LEN
        {
            anyhow::bail!(
                "Configuration error: auth.jwt_secret must be at least {} characters",
                MIN_JWT_SECRET_LEN
            );
        }

        if self.database.backend == DatabaseBackend::Mysql {
            let url = self
                .database
                .mysql
                .as_ref()
                .map(|m| m.url.as_str())
                .unwrap_or_default();
            if url.is_empty() {
                anyhow::bail!(
                    "Configuration error: database.mysql.url is required when database.backend is 'mysql'"
                );
            }
            if !url.starts_with("mysql://") && !url.starts_with("mariadb://") {
                anyhow::bail!(
                    "Configuration error: database.mysql.url must start with mysql:// or mariadb://"
                );
            }
        }

        if let Some(mysql) = &self.database.mysql
            && mysql.min_connections > mysql.max_connections
        {
            anyhow::bail!(
                "Configuration error: database.mysql.min_connections ({}) exceeds max_connections ({})",
                mysql.min_connections,
                mysql.max_connections
            );
        }

        Ok(())
    }
}

/// JSON files to merge, lowest precedence first
///
/// The profile file always applies when present. `--config` replaces the
/// working-directory file and must exist.
fn config_layers(cli: &CliConfig) -> Result<Vec<PathBuf>> {
    let mut layers: Vec<PathBuf> = get_profile_config_path()
        .into_iter()
        .filter(|p| p.exists())
        .collect();

    match &cli.config {
        Some(path) => {
            let explicit = expand_home(&path.to_string_lossy());
            anyhow::ensure!(explicit.exists(), "Config file not found: {}", explicit.display());
            layers.push(explicit);
        }
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                layers.push(local);
            }
        }
    }
    Ok(layers)
}

/// Get the profile config path (~/.dispensary/dispensary.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Default SQLite location (~/.dispensary/dispensary.db, or ./ without a home dir)
fn default_sqlite_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(APP_DOT_FOLDER))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SQLITE_DB_FILENAME)
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> PathBuf {
    let path = path.trim();
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_database_backend_serde() {
        let backend: DatabaseBackend = serde_json::from_str(r#""mysql""#).unwrap();
        assert_eq!(backend, DatabaseBackend::Mysql);
        let backend: DatabaseBackend = serde_json::from_str(r#""sqlite""#).unwrap();
        assert_eq!(backend, DatabaseBackend::Sqlite);
        assert!(serde_json::from_str::<DatabaseBackend>(r#""postgres""#).is_err());
    }

    #[test]
    fn test_database_backend_display() {
        assert_eq!(DatabaseBackend::Sqlite.to_string(), "sqlite");
        assert_eq!(DatabaseBackend::Mysql.to_string(), "mysql");
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "auth": { "enabled": false, "jwt_secret": "0123456789abcdef0123" },
            "cors": { "allowed_origins": ["http://localhost:3000"] },
            "database": {
                "backend": "mysql",
                "mysql": { "url": "mysql://root@db/catalog", "max_connections": 4 }
            },
            "debug": true
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, Some(8080));
        assert_eq!(config.auth.as_ref().unwrap().enabled, Some(false));
        assert_eq!(
            config.cors.as_ref().unwrap().allowed_origins,
            Some(vec!["http://localhost:3000".to_string()])
        );
        let database = config.database.as_ref().unwrap();
        assert_eq!(database.backend, Some(DatabaseBackend::Mysql));
        assert_eq!(database.mysql.as_ref().unwrap().max_connections, Some(4));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();
        assert!(config.server.is_none());
        assert!(config.database.is_none());
        assert!(config.debug.is_none());
    }

    #[test]
    fn test_file_config_extra_fields() {
        let json = r#"{ "server": { "port": 9000 }, "sever": { "port": 1 } }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.unwrap().port, Some(9000));
        let extra = config.extra.as_object().unwrap();
        assert!(extra.contains_key("sever"));
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = FileConfig {
            server: Some(ServerFileConfig {
                host: Some("base.host".to_string()),
                port: Some(1000),
            }),
            auth: Some(AuthFileConfig {
                enabled: Some(true),
                jwt_secret: None,
            }),
            database: Some(DatabaseFileConfig {
                backend: Some(DatabaseBackend::Mysql),
                sqlite: None,
                mysql: Some(MysqlFileConfig {
                    url: Some("mysql://base/catalog".to_string()),
                    max_connections: Some(20),
                    ..Default::default()
                }),
            }),
            debug: Some(false),
            ..Default::default()
        };

        let overlay = FileConfig {
            server: Some(ServerFileConfig {
                host: None,
                port: Some(2000),
            }),
            auth: Some(AuthFileConfig {
                enabled: Some(false),
                jwt_secret: None,
            }),
            database: Some(DatabaseFileConfig {
                backend: None,
                sqlite: None,
                mysql: Some(MysqlFileConfig {
                    url: Some("mysql://overlay/catalog".to_string()),
                    ..Default::default()
                }),
            }),
            debug: Some(true),
            ..Default::default()
        };

        base.merge(overlay);

        let server = base.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("base.host"));
        assert_eq!(server.port, Some(2000));
        assert_eq!(base.auth.unwrap().enabled, Some(false));
        let database = base.database.unwrap();
        assert_eq!(database.backend, Some(DatabaseBackend::Mysql));
        let mysql = database.mysql.unwrap();
        assert_eq!(mysql.url.as_deref(), Some("mysql://overlay/catalog"));
        assert_eq!(mysql.max_connections, Some(20));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::layer(FileConfig::default(), &CliConfig::default());
        config.validate().unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.auth.enabled);
        assert!(config.auth.jwt_secret.is_none());
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.database.backend, DatabaseBackend::Sqlite);
        assert!(config.database.mysql.is_none());
        assert!(
            config
                .database
                .sqlite
                .path
                .ends_with(SQLITE_DB_FILENAME)
        );
        assert!(!config.debug);
    }

    #[test]
    fn test_app_config_cli_override() {
        let file_config: FileConfig = serde_json::from_str(
            r#"{
                "server": { "host": "file.host", "port": 7000 },
                "cors": { "allowed_origins": ["http://file.example"] },
                "database": { "backend": "sqlite", "sqlite": { "path": "/tmp/file.db" } }
            }"#,
        )
        .unwrap();
        let cli = CliConfig {
            host: Some("cli.host".to_string()),
            port: Some(3000),
            no_auth: true,
            debug: true,
            cors_origins: Some(vec!["http://cli.example/".to_string()]),
            sqlite_path: Some(PathBuf::from("/tmp/cli.db")),
            ..Default::default()
        };

        let config = AppConfig::layer(file_config, &cli);

        assert_eq!(config.server.host, "cli.host");
        assert_eq!(config.server.port, 3000);
        assert!(!config.auth.enabled);
        assert!(config.debug);
        assert_eq!(config.cors.allowed_origins, vec!["http://cli.example"]);
        assert_eq!(config.database.sqlite.path, PathBuf::from("/tmp/cli.db"));
    }

    #[test]
    fn test_app_config_mysql_defaults_fill_pool_bounds() {
        let cli = CliConfig {
            database_backend: Some(DatabaseBackend::Mysql),
            mysql_url: Some("mysql://root@localhost/catalog".to_string()),
            ..Default::default()
        };
        let config = AppConfig::layer(FileConfig::default(), &cli);
        config.validate().unwrap();

        let mysql = config.database.mysql.unwrap();
        assert_eq!(mysql.url, "mysql://root@localhost/catalog");
        assert_eq!(mysql.max_connections, MYSQL_DEFAULT_MAX_CONNECTIONS);
        assert_eq!(mysql.min_connections, MYSQL_DEFAULT_MIN_CONNECTIONS);
        assert_eq!(mysql.idle_timeout_secs, MYSQL_DEFAULT_IDLE_TIMEOUT_SECS);
    }

    #[test]
    fn test_app_config_load_from_cli_config_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "server": {{ "port": 6123 }}, "debug": true }}"#).unwrap();

        let cli = CliConfig {
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.port, 6123);
        assert!(config.debug);
    }

    #[test]
    fn test_app_config_missing_config_path() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/dispensary.json")),
            ..Default::default()
        };
        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_app_config_validation_server_port_zero() {
        let cli = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let err = AppConfig::layer(FileConfig::default(), &cli)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("server.port is 0"));
    }

    #[test]
    fn test_app_config_validation_empty_host() {
        let cli = CliConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        let err = AppConfig::layer(FileConfig::default(), &cli)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("server.host is empty"));
    }

    #[test]
    fn test_app_config_validation_mysql_requires_url() {
        let cli = CliConfig {
            database_backend: Some(DatabaseBackend::Mysql),
            ..Default::default()
        };
        let err = AppConfig::layer(FileConfig::default(), &cli)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("database.mysql.url is required"));
    }

    #[test]
    fn test_app_config_validation_short_jwt_secret() {
        let cli = CliConfig {
            jwt_secret: Some("short".to_string()),
            ..Default::default()
        };
        let err = AppConfig::layer(FileConfig::default(), &cli)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("auth.jwt_secret"));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/etc/catalog.db"), PathBuf::from("/etc/catalog.db"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/catalog.db"), home.join("catalog.db"));
        }
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(!is_all_interfaces("127.0.0.1"));
    }
}
