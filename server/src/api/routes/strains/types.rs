//! Strain API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::data::filters::StrainFilter;
use crate::data::types::{Category, NewStrain, StrainRow, StrainType, StrainUpdate};

/// Strain DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct StrainDto {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StrainRow> for StrainDto {
    fn from(row: StrainRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            strain_name: row.strain_name,
            strain_type: row.strain_type,
            thc_content: row.thc_content,
            cbd_content: row.cbd_content,
            price: row.price,
            store_location: row.store_location,
            is_special: row.is_special,
            medical_uses: row.medical_uses,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Filtered listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ListStrainsResponse {
    pub data: Vec<StrainDto>,
    /// Rows matching the filters before limit/offset
    pub total_count: u64,
    /// Normalized filters that produced this page
    pub filters: StrainFilter,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConditionStrainsResponse {
    pub data: Vec<StrainDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteStrainResponse {
    pub deleted: bool,
}

/// Request body for creating a strain
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStrainRequest {
    pub category: Category,

    #[validate(custom(function = "validate_strain_name"))]
    pub strain_name: String,

    pub strain_type: StrainType,

    #[validate(range(min = 0.0, max = 100.0, message = "THC content must be between 0 and 100"))]
    pub thc_content: f64,

    #[validate(range(min = 0.0, max = 100.0, message = "CBD content must be between 0 and 100"))]
    pub cbd_content: f64,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(length(max = 100, message = "Store location must be at most 100 characters"))]
    pub store_location: Option<String>,

    #[serde(default)]
    pub is_special: bool,

    #[validate(length(max = 1000, message = "Medical uses must be at most 1000 characters"))]
    pub medical_uses: Option<String>,
}

impl From<CreateStrainRequest> for NewStrain {
    fn from(body: CreateStrainRequest) -> Self {
        Self {
            category: body.category,
            strain_name: body.strain_name.trim().to_string(),
            strain_type: body.strain_type,
            thc_content: body.thc_content,
            cbd_content: body.cbd_content,
            price: body.price,
            store_location: body.store_location,
            is_special: body.is_special,
            medical_uses: body.medical_uses,
        }
    }
}

/// Request body for updating a strain; omitted fields keep their value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStrainRequest {
    pub category: Option<Category>,

    #[validate(custom(function = "validate_strain_name"))]
    pub strain_name: Option<String>,

    pub strain_type: Option<StrainType>,

    #[validate(range(min = 0.0, max = 100.0, message = "THC content must be between 0 and 100"))]
    pub thc_content: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0, message = "CBD content must be between 0 and 100"))]
    pub cbd_content: Option<f64>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    #[validate(length(max = 100, message = "Store location must be at most 100 characters"))]
    pub store_location: Option<String>,

    pub is_special: Option<bool>,

    #[validate(length(max = 1000, message = "Medical uses must be at most 1000 characters"))]
    pub medical_uses: Option<String>,
}

impl From<UpdateStrainRequest> for StrainUpdate {
    fn from(body: UpdateStrainRequest) -> Self {
        Self {
            category: body.category,
            strain_name: body.strain_name.map(|n| n.trim().to_string()),
            strain_type: body.strain_type,
            thc_content: body.thc_content,
            cbd_content: body.cbd_content,
            price: body.price,
            store_location: body.store_location,
            is_special: body.is_special,
            medical_uses: body.medical_uses,
        }
    }
}

/// Optional `?category=` guard on update and delete
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CategoryScopeQuery {
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,
}

impl CategoryScopeQuery {
    /// Parsed scope; blank means unscoped
    pub fn scope(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::parse)
    }
}

/// Names are stored trimmed, so the bounds apply after trimming
fn validate_strain_name<T: AsRef<str>>(value: T) -> Result<(), ValidationError> {
    let chars = value.as_ref().trim().chars().count();
    if (1..=100).contains(&chars) {
        return Ok(());
    }
    Err(ValidationError::new("strain_name")
        .with_message("Strain name must be 1-100 characters".into()))
}

fn validate_category<T: AsRef<str>>(value: T) -> Result<(), ValidationError> {
    let value = value.as_ref();
    if value.trim().is_empty() || Category::parse(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("category").with_message(
        format!(
            "Unknown category '{}'. Expected one of: {}",
            value,
            Category::ALL.map(|c| c.as_str()).join(", ")
        )
        .into(),
    ))
}
