//! Filter type definitions
//!
//! Typed strain filter plus the closed sort enums and positional SQL parameters.

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::{Category, StrainType};

/// Sortable strain columns
///
/// The only identifiers that are ever written into ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    StrainName,
    ThcContent,
    CbdContent,
    Price,
    StrainType,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        Self::StrainName,
        Self::ThcContent,
        Self::CbdContent,
        Self::Price,
        Self::StrainType,
    ];

    /// Parse a requested column; anything outside the allow-list becomes the default
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim() {
            "strain_name" => Self::StrainName,
            "thc_content" => Self::ThcContent,
            "cbd_content" => Self::CbdContent,
            "price" => Self::Price,
            "strain_type" => Self::StrainType,
            _ => Self::default(),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::StrainName => "strain_name",
            Self::ThcContent => "thc_content",
            Self::CbdContent => "cbd_content",
            Self::Price => "price",
            Self::StrainType => "strain_type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `desc` (any case) sorts descending, everything else ascending
    pub fn parse_or_default(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Normalized strain listing filter
///
/// Every bound is optional and absent bounds add no constraint.
/// Serialized with the external query parameter names when echoed back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StrainFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thc_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thc_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cbd_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cbd_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strain_type: Option<StrainType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Only `true` constrains; `false` means "no special filter"
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub special: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    pub sort_by: SortColumn,
    pub sort_dir: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// A positional SQL parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlParams {
    pub values: Vec<SqlValue>,
}

impl SqlParams {
    pub fn push(&mut self, value: SqlValue) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_column_rejects_identifiers_outside_allow_list() {
        assert_eq!(SortColumn::parse_or_default("price"), SortColumn::Price);
        assert_eq!(
            SortColumn::parse_or_default("price; DROP TABLE strains"),
            SortColumn::StrainName
        );
        assert_eq!(SortColumn::parse_or_default("id"), SortColumn::StrainName);
        assert_eq!(SortColumn::parse_or_default(""), SortColumn::StrainName);
    }

    #[test]
    fn sort_column_sql_names_match_parse_names() {
        for column in SortColumn::ALL {
            assert_eq!(SortColumn::parse_or_default(column.as_sql()), column);
        }
    }

    #[test]
    fn sort_direction_case_insensitive() {
        assert_eq!(SortDirection::parse_or_default("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse_or_default("Asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse_or_default("down"), SortDirection::Asc);
    }

    #[test]
    fn filter_echo_omits_absent_bounds() {
        let filter = StrainFilter {
            thc_min: Some(0.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&filter).unwrap();

        assert_eq!(json["thc_min"], 0.0);
        assert_eq!(json["sort_by"], "strain_name");
        assert_eq!(json["sort_dir"], "asc");
        assert!(json.get("thc_max").is_none());
        assert!(json.get("special").is_none());
        assert!(json.get("offset").is_none());
    }
}
