//! Catalog classification enums
//!
//! Closed sets stored as text in every backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// ============================================================================
// CATEGORY
// ============================================================================

/// Product category a strain is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Flower,
    PreRolls,
    Vapes,
    Concentrates,
    Edibles,
    Tinctures,
    Topicals,
    Medical,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Flower,
        Self::PreRolls,
        Self::Vapes,
        Self::Concentrates,
        Self::Edibles,
        Self::Tinctures,
        Self::Topicals,
        Self::Medical,
    ];

    /// Parse from string representation (case-insensitive, `-` accepted for `_`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "flower" => Some(Self::Flower),
            "pre_rolls" => Some(Self::PreRolls),
            "vapes" => Some(Self::Vapes),
            "concentrates" => Some(Self::Concentrates),
            "edibles" => Some(Self::Edibles),
            "tinctures" => Some(Self::Tinctures),
            "topicals" => Some(Self::Topicals),
            "medical" => Some(Self::Medical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::PreRolls => "pre_rolls",
            Self::Vapes => "vapes",
            Self::Concentrates => "concentrates",
            Self::Edibles => "edibles",
            Self::Tinctures => "tinctures",
            Self::Topicals => "topicals",
            Self::Medical => "medical",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// STRAIN TYPE
// ============================================================================

/// Botanical strain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StrainType {
    Sativa,
    Indica,
    Hybrid,
}

impl StrainType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sativa" => Some(Self::Sativa),
            "indica" => Some(Self::Indica),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sativa => "Sativa",
            Self::Indica => "Indica",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for StrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
