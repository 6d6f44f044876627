//! StrainRepository trait implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::StrainFilter;
use crate::data::traits::StrainRepository;
use crate::data::types::{Category, NewStrain, StrainPage, StrainRow, StrainUpdate};

use super::SqliteService;
use super::repositories::strain;

#[async_trait]
impl StrainRepository for Arc<SqliteService> {
    async fn list_strains(&self, filter: &StrainFilter) -> Result<StrainPage, DataError> {
        let (rows, total_count) = strain::list_strains(self.pool(), filter).await?;
        Ok(StrainPage {
            rows,
            total_count,
            filters: filter.clone(),
        })
    }

    async fn get_strain(&self, id: i64) -> Result<Option<StrainRow>, DataError> {
        strain::get_strain(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn get_strains_by_condition(
        &self,
        condition: &str,
    ) -> Result<Vec<StrainRow>, DataError> {
        strain::list_by_condition(self.pool(), condition)
            .await
            .map_err(Into::into)
    }

    async fn create_strain(&self, new: NewStrain) -> Result<StrainRow, DataError> {
        strain::create_strain(self.pool(), new)
            .await
            .map_err(Into::into)
    }

    async fn update_strain(
        &self,
        id: i64,
        scope: Option<Category>,
        update: &StrainUpdate,
    ) -> Result<bool, DataError> {
        strain::update_strain(self.pool(), id, scope, update)
            .await
            .map_err(Into::into)
    }

    async fn delete_strain(&self, id: i64, scope: Option<Category>) -> Result<bool, DataError> {
        strain::delete_strain(self.pool(), id, scope)
            .await
            .map_err(Into::into)
    }
}
