//! MySQL error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MysqlError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = MysqlError::Config("Invalid MySQL URL: missing host".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid MySQL URL: missing host"
        );
    }

    #[test]
    fn test_database_error_from() {
        let err: MysqlError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, MysqlError::Database(sqlx::Error::PoolTimedOut)));
    }
}
