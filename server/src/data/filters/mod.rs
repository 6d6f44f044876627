//! Strain query filter system
//!
//! Raw query parameters flow through three steps:
//! - `parser` normalizes and validates them into a [`StrainFilter`]
//! - `builder` turns the filter into a parameterized listing statement
//! - the same builder derives the COUNT statement from the identical predicate
//!
//! ## Usage
//!
//! ```no_run
//! use std::collections::HashMap;
//! use dispensary_server::data::filters::{parse_strain_filter, StrainQuery};
//!
//! let mut raw = HashMap::new();
//! raw.insert("category".to_string(), "medical".to_string());
//! raw.insert("thc_min".to_string(), "15".to_string());
//! let filter = parse_strain_filter(&raw).unwrap();
//! let query = StrainQuery::build(&filter);
//! let (sql, params) = (query.select_sql(), query.params());
//! ```

mod builder;
mod parser;
mod types;

pub use builder::{STRAIN_COLUMNS, STRAINS_TABLE, StrainQuery};
pub use parser::{MAX_LIMIT, parse_strain_filter};
pub use types::{SortColumn, SortDirection, SqlParams, SqlValue, StrainFilter};
