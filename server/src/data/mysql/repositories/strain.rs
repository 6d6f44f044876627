//! Strain repository for MySQL operations
//!
//! Statements match the SQLite repository; MySQL escapes LIKE patterns with
//! backslash by default and compares text with the table's `_ci` collation.

use sqlx::query::QueryAs;
use sqlx::{Database, MySql, MySqlPool};

use crate::data::filters::{STRAIN_COLUMNS, SqlParams, SqlValue, StrainFilter, StrainQuery};
use crate::data::mysql::MysqlError;
use crate::data::types::{Category, NewStrain, StrainRow, StrainTuple, StrainUpdate};
use crate::utils::sql::contains_pattern;

type MySqlQueryAs<'q, O> = QueryAs<'q, MySql, O, <MySql as Database>::Arguments<'q>>;

fn bind_params<'q, O>(mut query: MySqlQueryAs<'q, O>, params: &SqlParams) -> MySqlQueryAs<'q, O> {
    for value in &params.values {
        query = match value {
            SqlValue::Text(s) => query.bind(s.clone()),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Bool(b) => query.bind(*b),
        };
    }
    query
}

/// List strains matching a filter, with the unpaginated match count
pub async fn list_strains(
    pool: &MySqlPool,
    filter: &StrainFilter,
) -> Result<(Vec<StrainRow>, u64), MysqlError> {
    let query = StrainQuery::build(filter);

    let count_sql = query.count_sql();
    let total: (i64,) = bind_params(sqlx::query_as(&count_sql), query.count_params())
        .fetch_one(pool)
        .await?;

    let select_sql = query.select_sql();
    let rows = bind_params(
        sqlx::query_as::<_, StrainTuple>(&select_sql),
        &query.params(),
    )
    .fetch_all(pool)
    .await?;

    Ok((
        rows.into_iter().map(StrainRow::from).collect(),
        total.0.max(0) as u64,
    ))
}

pub async fn get_strain(pool: &MySqlPool, id: i64) -> Result<Option<StrainRow>, MysqlError> {
    let sql = format!("SELECT {} FROM strains WHERE id = ?", STRAIN_COLUMNS);
    let row = sqlx::query_as::<_, StrainTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(StrainRow::from))
}

pub async fn list_by_condition(
    pool: &MySqlPool,
    condition: &str,
) -> Result<Vec<StrainRow>, MysqlError> {
    let sql = format!(
        "SELECT {} FROM strains WHERE category = ? AND medical_uses LIKE ? ORDER BY strain_name ASC",
        STRAIN_COLUMNS
    );
    let rows = sqlx::query_as::<_, StrainTuple>(&sql)
        .bind(Category::Medical.as_str())
        .bind(contains_pattern(condition))
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(StrainRow::from).collect())
}

pub async fn create_strain(pool: &MySqlPool, new: NewStrain) -> Result<StrainRow, MysqlError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO strains (category, strain_name, strain_type, thc_content, cbd_content, price, store_location, is_special, medical_uses, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(new.category.as_str())
    .bind(&new.strain_name)
    .bind(new.strain_type.as_str())
    .bind(new.thc_content)
    .bind(new.cbd_content)
    .bind(new.price)
    .bind(&new.store_location)
    .bind(new.is_special)
    .bind(&new.medical_uses)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let id = i64::try_from(result.last_insert_id())
        .map_err(|_| sqlx::Error::Protocol("AUTO_INCREMENT id exceeds BIGINT range".into()))?;
    Ok(new.into_row(id, now))
}

/// Apply a partial update; returns false when no row matched
///
/// sqlx connects with CLIENT_FOUND_ROWS, so a matched row whose values did
/// not change still counts as affected.
pub async fn update_strain(
    pool: &MySqlPool,
    id: i64,
    scope: Option<Category>,
    update: &StrainUpdate,
) -> Result<bool, MysqlError> {
    let now = chrono::Utc::now().timestamp();

    let mut sql = String::from(
        "UPDATE strains SET \
         category = COALESCE(?, category), \
         strain_name = COALESCE(?, strain_name), \
         strain_type = COALESCE(?, strain_type), \
         thc_content = COALESCE(?, thc_content), \
         cbd_content = COALESCE(?, cbd_content), \
         price = COALESCE(?, price), \
         store_location = COALESCE(?, store_location), \
         is_special = COALESCE(?, is_special), \
         medical_uses = COALESCE(?, medical_uses), \
         updated_at = ? \
         WHERE id = ?",
    );
    if scope.is_some() {
        sql.push_str(" AND category = ?");
    }

    let mut query = sqlx::query(&sql)
        .bind(update.category.map(|c| c.as_str()))
        .bind(update.strain_name.as_deref())
        .bind(update.strain_type.map(|t| t.as_str()))
        .bind(update.thc_content)
        .bind(update.cbd_content)
        .bind(update.price)
        .bind(update.store_location.as_deref())
        .bind(update.is_special)
        .bind(update.medical_uses.as_deref())
        .bind(now)
        .bind(id);
    if let Some(category) = scope {
        query = query.bind(category.as_str());
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_strain(
    pool: &MySqlPool,
    id: i64,
    scope: Option<Category>,
) -> Result<bool, MysqlError> {
    let result = match scope {
        Some(category) => {
            sqlx::query("DELETE FROM strains WHERE id = ? AND category = ?")
                .bind(id)
                .bind(category.as_str())
                .execute(pool)
                .await?
        }
        None => {
            sqlx::query("DELETE FROM strains WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await?
        }
    };

    Ok(result.rows_affected() > 0)
}
