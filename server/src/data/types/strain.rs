//! Strain row types shared by the SQLite and MySQL backends

use serde::{Deserialize, Serialize};

use super::enums::{Category, StrainType};
use crate::data::filters::StrainFilter;

/// Strain row from database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrainRow {
    pub id: i64,
    pub category: String,
    pub strain_name: String,
    pub strain_type: String,
    pub thc_content: f64,
    pub cbd_content: f64,
    pub price: f64,
    pub store_location: Option<String>,
    pub is_special: bool,
    pub medical_uses: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Column tuple in `STRAIN_COLUMNS` order, as decoded by both backends
pub type StrainTuple = (
    i64,
    String,
    String,
    String,
    f64,
    f64,
    f64,
    Option<String>,
    bool,
    Option<String>,
    i64,
    i64,
);

impl From<StrainTuple> for StrainRow {
    fn from(row: StrainTuple) -> Self {
        let (
            id,
            category,
            strain_name,
            strain_type,
            thc_content,
            cbd_content,
            price,
            store_location,
            is_special,
            medical_uses,
            created_at,
            updated_at,
        ) = row;
        Self {
            id,
            category,
            strain_name,
            strain_type,
            thc_content,
            cbd_content,
            price,
            store_location,
            is_special,
            medical_uses,
            created_at,
            updated_at,
        }
    }
}

/// Values for a new strain row
#[derive(Debug, Clone)]
pub struct NewStrain {
    pub category: Category,
    pub strain_name: String,
    pub strain_type: StrainType,
    pub thc_content: f64,
    pub cbd_content: f64,
    pub price: f64,
    pub store_location: Option<String>,
    pub is_special: bool,
    pub medical_uses: Option<String>,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct StrainUpdate {
    pub category: Option<Category>,
    pub strain_name: Option<String>,
    pub strain_type: Option<StrainType>,
    pub thc_content: Option<f64>,
    pub cbd_content: Option<f64>,
    pub price: Option<f64>,
    pub store_location: Option<String>,
    pub is_special: Option<bool>,
    pub medical_uses: Option<String>,
}

impl NewStrain {
    /// Row as stored, given the generated id and timestamp
    pub fn into_row(self, id: i64, now: i64) -> StrainRow {
        StrainRow {
            id,
            category: self.category.as_str().to_string(),
            strain_name: self.strain_name,
            strain_type: self.strain_type.as_str().to_string(),
            thc_content: self.thc_content,
            cbd_content: self.cbd_content,
            price: self.price,
            store_location: self.store_location,
            is_special: self.is_special,
            medical_uses: self.medical_uses,
            created_at: now,
            updated_at: now,
        }
    }
}

impl StrainUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.strain_name.is_none()
            && self.strain_type.is_none()
            && self.thc_content.is_none()
            && self.cbd_content.is_none()
            && self.price.is_none()
            && self.store_location.is_none()
            && self.is_special.is_none()
            && self.medical_uses.is_none()
    }
}

/// One page of a filtered listing
#[derive(Debug, Clone)]
pub struct StrainPage {
    pub rows: Vec<StrainRow>,
    /// Matches for the filter predicate before LIMIT/OFFSET
    pub total_count: u64,
    pub filters: StrainFilter,
}
