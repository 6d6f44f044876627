//! SQL filter builder
//!
//! Builds the listing statement and its matching COUNT statement from one
//! WHERE predicate, so both always agree on which rows match.

use super::types::{SortColumn, SortDirection, SqlParams, SqlValue, StrainFilter};

/// Strains table name
pub const STRAINS_TABLE: &str = "strains";

/// Column list selected for every strain row (order matches the row tuple)
pub const STRAIN_COLUMNS: &str = "id, category, strain_name, strain_type, thc_content, \
     cbd_content, price, store_location, is_special, medical_uses, created_at, updated_at";

/// A built strain listing query
///
/// `?` placeholders work for both SQLite and MySQL.
#[derive(Debug, Clone)]
pub struct StrainQuery {
    predicate: String,
    predicate_params: SqlParams,
    sort_by: SortColumn,
    sort_dir: SortDirection,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl StrainQuery {
    /// Translate a filter into WHERE clauses in fixed order
    pub fn build(filter: &StrainFilter) -> Self {
        let mut clauses: Vec<&'static str> = Vec::new();
        let mut params = SqlParams::default();

        let mut push = |clause: &'static str, value: SqlValue| {
            clauses.push(clause);
            params.push(value);
        };

        if let Some(category) = filter.category {
            push("category = ?", SqlValue::Text(category.as_str().to_string()));
        }
        if let Some(v) = filter.thc_min {
            push("thc_content >= ?", SqlValue::Float(v));
        }
        if let Some(v) = filter.thc_max {
            push("thc_content <= ?", SqlValue::Float(v));
        }
        if let Some(v) = filter.cbd_min {
            push("cbd_content >= ?", SqlValue::Float(v));
        }
        if let Some(v) = filter.cbd_max {
            push("cbd_content <= ?", SqlValue::Float(v));
        }
        if let Some(strain_type) = filter.strain_type {
            push(
                "strain_type = ?",
                SqlValue::Text(strain_type.as_str().to_string()),
            );
        }
        if let Some(location) = &filter.location {
            push("store_location = ?", SqlValue::Text(location.clone()));
        }
        if filter.special {
            push("is_special = ?", SqlValue::Bool(true));
        }
        if let Some(v) = filter.min_price {
            push("price >= ?", SqlValue::Float(v));
        }
        if let Some(v) = filter.max_price {
            push("price <= ?", SqlValue::Float(v));
        }

        let mut predicate = String::from("1=1");
        for clause in &clauses {
            predicate.push_str(" AND ");
            predicate.push_str(clause);
        }

        Self {
            predicate,
            predicate_params: params,
            sort_by: filter.sort_by,
            sort_dir: filter.sort_dir,
            limit: filter.limit,
            // OFFSET without LIMIT is dropped
            offset: filter.limit.and(filter.offset),
        }
    }

    /// Row selection with ORDER BY and pagination
    pub fn select_sql(&self) -> String {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {} {}",
            STRAIN_COLUMNS,
            STRAINS_TABLE,
            self.predicate,
            self.sort_by.as_sql(),
            self.sort_dir.as_sql()
        );
        if self.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }
        if self.offset.is_some() {
            sql.push_str(" OFFSET ?");
        }
        sql
    }

    /// Parameters for [`select_sql`](Self::select_sql) in placeholder order
    pub fn params(&self) -> SqlParams {
        let mut params = self.predicate_params.clone();
        if let Some(limit) = self.limit {
            params.push(SqlValue::Int(i64::from(limit)));
        }
        if let Some(offset) = self.offset {
            params.push(SqlValue::Int(i64::from(offset)));
        }
        params
    }

    /// Total-count statement over the same predicate, without ORDER BY or pagination
    pub fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            STRAINS_TABLE, self.predicate
        )
    }

    pub fn count_params(&self) -> &SqlParams {
        &self.predicate_params
    }
}
