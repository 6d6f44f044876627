//! Versioned schema upgrades for the SQLite catalog
//!
//! The single-row `schema_version` table records the last applied step.
//! A missing row counts as version 0, so the idempotent steps are replayed.

use sqlx::SqlitePool;

use super::error::SqliteError;
use super::schema::{SCHEMA, SCHEMA_VERSION};

struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA,
}];

/// Bring the database up to [`SCHEMA_VERSION`]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteError> {
    let current = stored_version(pool).await?;

    if current > SCHEMA_VERSION {
        tracing::warn!(current, supported = SCHEMA_VERSION, "Catalog schema is newer than this build");
        return Ok(());
    }

    let pending: Vec<_> = MIGRATIONS.iter().filter(|m| m.version > current).collect();
    if pending.is_empty() {
        tracing::debug!(version = current, "Catalog schema up to date");
        return Ok(());
    }

    for step in pending {
        let started = std::time::Instant::now();
        apply(pool, step).await.map_err(|e| SqliteError::MigrationFailed {
            version: step.version,
            name: step.name.to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!(
            version = step.version,
            name = step.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Applied migration"
        );
    }

    Ok(())
}

async fn stored_version(pool: &SqlitePool) -> Result<i32, sqlx::Error> {
    let has_table: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
    )
    .fetch_one(pool)
    .await?;
    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> = sqlx::query_scalar("SELECT version FROM schema_version WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

async fn apply(pool: &SqlitePool, step: &Migration) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(step.sql).execute(&mut *tx).await?;
    sqlx::query(
        "INSERT INTO schema_version (id, version, applied_at, description) VALUES (1, ?, ?, ?) \
         ON CONFLICT(id) DO UPDATE SET version = excluded.version, \
         applied_at = excluded.applied_at, description = excluded.description",
    )
    .bind(step.version)
    .bind(chrono::Utc::now().timestamp())
    .bind(step.name)
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}
