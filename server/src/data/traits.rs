//! Repository traits for database backends
//!
//! One trait gives handlers a backend-agnostic view of the strain catalog.
//! SQLite and MySQL each implement it over their own pool.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::StrainFilter;
use crate::data::types::{Category, NewStrain, StrainPage, StrainRow, StrainUpdate};

/// Repository trait for the strain catalog
#[async_trait]
pub trait StrainRepository: Send + Sync {
    /// Filtered, sorted, paginated listing plus the total match count
    async fn list_strains(&self, filter: &StrainFilter) -> Result<StrainPage, DataError>;

    /// Get a single strain by ID
    async fn get_strain(&self, id: i64) -> Result<Option<StrainRow>, DataError>;

    /// Medical strains whose medical uses mention `condition`
    async fn get_strains_by_condition(&self, condition: &str)
    -> Result<Vec<StrainRow>, DataError>;

    async fn create_strain(&self, new: NewStrain) -> Result<StrainRow, DataError>;

    /// Partial update; `Ok(false)` when no row matched id (and scope)
    async fn update_strain(
        &self,
        id: i64,
        scope: Option<Category>,
        update: &StrainUpdate,
    ) -> Result<bool, DataError>;

    /// Physical delete; `Ok(false)` when no row matched id (and scope)
    async fn delete_strain(&self, id: i64, scope: Option<Category>) -> Result<bool, DataError>;
}
