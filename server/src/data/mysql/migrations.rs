//! Versioned schema upgrades for the MySQL catalog
//!
//! DDL commits implicitly in MySQL, so each step runs its statements one at a
//! time and records the version afterwards.

use sqlx::MySqlPool;

use super::error::MysqlError;
use super::schema::{SCHEMA_STATEMENTS, SCHEMA_VERSION};

struct Migration {
    version: i32,
    name: &'static str,
    statements: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    statements: SCHEMA_STATEMENTS,
}];

/// Bring the database up to [`SCHEMA_VERSION`]
pub async fn run_migrations(pool: &MySqlPool) -> Result<(), MysqlError> {
    let current = stored_version(pool).await?;

    if current > SCHEMA_VERSION {
        tracing::warn!(current, supported = SCHEMA_VERSION, "Catalog schema is newer than this build");
        return Ok(());
    }

    for step in MIGRATIONS.iter().filter(|m| m.version > current) {
        apply(pool, step).await?;
        tracing::debug!(version = step.version, name = step.name, "Applied migration");
    }

    Ok(())
}

async fn stored_version(pool: &MySqlPool) -> Result<i32, sqlx::Error> {
    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = DATABASE() AND table_name = 'schema_version'",
    )
    .fetch_one(pool)
    .await?;
    if tables == 0 {
        return Ok(0);
    }

    let version: Option<i32> = sqlx::query_scalar("SELECT version FROM schema_version WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

async fn apply(pool: &MySqlPool, step: &Migration) -> Result<(), MysqlError> {
    let failed = |index: usize, e: sqlx::Error| MysqlError::MigrationFailed {
        version: step.version,
        name: step.name.to_string(),
        error: format!("statement {}: {}", index + 1, e),
    };

    for (index, statement) in step.statements.iter().enumerate() {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| failed(index, e))?;
    }

    sqlx::query(
        "INSERT INTO schema_version (id, version, applied_at, description) VALUES (1, ?, ?, ?) \
         ON DUPLICATE KEY UPDATE version = VALUES(version), applied_at = VALUES(applied_at), \
         description = VALUES(description)",
    )
    .bind(step.version)
    .bind(chrono::Utc::now().timestamp())
    .bind(step.name)
    .execute(pool)
    .await?;

    Ok(())
}
