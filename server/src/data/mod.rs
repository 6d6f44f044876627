//! Data storage layer
//!
//! - `filters` - Strain filter normalization and SQL building
//! - `sqlite` - Embedded backend (default)
//! - `mysql` - Shared server backend
//! - `types` - Row and enum types shared by both backends
//! - `traits` - Repository trait implemented by each backend
//! - `error` - Unified error type for all backends

pub mod error;
pub mod filters;
pub mod mysql;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use mysql::MysqlService;
pub use sqlite::SqliteService;
pub use traits::StrainRepository;

use std::sync::Arc;

use crate::core::config::{DatabaseBackend, DatabaseConfig};

/// Catalog database service
///
/// Wraps the backend selected in configuration. The pool lives inside the
/// wrapped service and is handed to handlers only through [`repository`](Self::repository).
pub enum DatabaseService {
    /// SQLite backend (default, embedded)
    Sqlite(Arc<SqliteService>),
    /// MySQL backend
    Mysql(Arc<MysqlService>),
}

impl DatabaseService {
    /// Initialize the backend named in configuration
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DataError> {
        match config.backend {
            DatabaseBackend::Sqlite => {
                let service = SqliteService::init(&config.sqlite.path).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            DatabaseBackend::Mysql => {
                let mysql = config.mysql.as_ref().ok_or_else(|| {
                    DataError::Config("MySQL configuration required".to_string())
                })?;
                let service = MysqlService::init(mysql).await?;
                Ok(Self::Mysql(Arc::new(service)))
            }
        }
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Mysql(m) => m.close().await,
        }
    }

    pub fn backend(&self) -> DatabaseBackend {
        match self {
            Self::Sqlite(_) => DatabaseBackend::Sqlite,
            Self::Mysql(_) => DatabaseBackend::Mysql,
        }
    }

    /// Get the repository trait object for catalog operations
    pub fn repository(&self) -> Box<dyn StrainRepository + Send + Sync> {
        match self {
            Self::Sqlite(s) => Box::new(Arc::clone(s)),
            Self::Mysql(m) => Box::new(Arc::clone(m)),
        }
    }

    /// In-memory SQLite service (tests)
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let service = SqliteService::in_memory()
            .await
            .expect("in-memory sqlite");
        Self::Sqlite(Arc::new(service))
    }
}
