//! Shared data types for all database backends
//!
//! Row and enum types used by both SQLite and MySQL so the API layer sees one model.

mod enums;
mod strain;

pub use enums::{Category, StrainType};
pub use strain::{NewStrain, StrainPage, StrainRow, StrainTuple, StrainUpdate};
