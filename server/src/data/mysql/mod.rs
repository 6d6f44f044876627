//! MySQL database service
//!
//! Backend for deployments where several stores share one catalog:
//! - Connection pooling with min/max bounds
//! - Idle connection cleanup and lifetime cycling
//!
//! Schema and migrations are managed here.

pub mod error;
mod migrations;
pub mod repositories;
mod repository_impl;
pub mod schema;

pub use error::MysqlError;
pub use sqlx::MySqlPool;

use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::log::LevelFilter;

use crate::core::config::MysqlConfig;
use crate::core::constants::{
    MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS, MYSQL_DEFAULT_IDLE_TIMEOUT_SECS,
    MYSQL_DEFAULT_MAX_CONNECTIONS, MYSQL_DEFAULT_MAX_LIFETIME_SECS, MYSQL_DEFAULT_MIN_CONNECTIONS,
};

/// MySQL database service
///
/// Owns the connection pool. Created once at startup and shared through
/// [`DatabaseService`](crate::data::DatabaseService).
pub struct MysqlService {
    pool: MySqlPool,
}

/// `value` when set, otherwise `default`
fn or_default<T: PartialEq + Default>(value: T, default: T) -> T {
    if value == T::default() { default } else { value }
}

impl MysqlService {
    /// Connect using the configured URL and pool bounds, then run migrations
    pub async fn init(config: &MysqlConfig) -> Result<Self, MysqlError> {
        let url = config.url.as_str();
        if url.is_empty() {
            return Err(MysqlError::Config("MySQL URL is required".into()));
        }

        let max_connections = or_default(config.max_connections, MYSQL_DEFAULT_MAX_CONNECTIONS);
        let min_connections = or_default(config.min_connections, MYSQL_DEFAULT_MIN_CONNECTIONS);
        let acquire_timeout =
            or_default(config.acquire_timeout_secs, MYSQL_DEFAULT_ACQUIRE_TIMEOUT_SECS);
        let idle_timeout = or_default(config.idle_timeout_secs, MYSQL_DEFAULT_IDLE_TIMEOUT_SECS);
        let max_lifetime = or_default(config.max_lifetime_secs, MYSQL_DEFAULT_MAX_LIFETIME_SECS);

        let options: MySqlConnectOptions = url
            .parse()
            .map_err(|e| MysqlError::Config(format!("Invalid MySQL URL: {}", e)))?;
        let options = options
            .charset("utf8mb4")
            .log_statements(LevelFilter::Trace);

        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .max_lifetime(Duration::from_secs(max_lifetime))
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!(
            max_connections,
            min_connections,
            acquire_timeout_secs = acquire_timeout,
            idle_timeout_secs = idle_timeout,
            max_lifetime_secs = max_lifetime,
            "MysqlService initialized"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("MySQL pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_default_prefers_configured_value() {
        assert_eq!(or_default(0u32, MYSQL_DEFAULT_MAX_CONNECTIONS), MYSQL_DEFAULT_MAX_CONNECTIONS);
        assert_eq!(or_default(7u32, MYSQL_DEFAULT_MAX_CONNECTIONS), 7);
        assert_eq!(or_default(0u64, 30u64), 30);
    }

    #[tokio::test]
    async fn init_rejects_empty_url() {
        let config = MysqlConfig::default();
        let err = MysqlService::init(&config).await.err().unwrap();
        assert!(matches!(err, MysqlError::Config(_)));
    }

    #[tokio::test]
    async fn init_rejects_malformed_url() {
        let config = MysqlConfig {
            url: "not a url".to_string(),
            ..Default::default()
        };
        let err = MysqlService::init(&config).await.err().unwrap();
        assert!(matches!(err, MysqlError::Config(_)));
    }
}
